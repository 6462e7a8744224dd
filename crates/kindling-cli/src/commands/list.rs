//! Implementation of the `kindling list` command.

use std::sync::Arc;

use kindling_core::application::TemplateService;

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    commands::template_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = TemplateService::new(Arc::from(template_store(&config)?));
    let templates = TemplateService::list(&service.discover()?);

    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for t in &templates {
                output.print(&format!(
                    "  {:<42} {:<12} {}",
                    t.identifier,
                    t.category.to_string(),
                    t.output_path
                ))?;
            }
        }
        ListFormat::Json => output.json(&templates)?,
        ListFormat::List => {
            for t in &templates {
                println!("{}", t.identifier);
            }
        }
    }

    Ok(())
}
