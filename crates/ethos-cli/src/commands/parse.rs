//! The parse command.

use crate::{Formatter, ParseArgs, Result};
use ethos_parser::FiracParser;
use ethos_pipeline::PipelineConfig;

/// Parse a narrative and print its FIRAC sections
pub fn execute_parse(
    args: ParseArgs,
    config: &PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let narrative = args.narrative()?;
    let parser = FiracParser::new(config.parser.clone());
    let sections = parser.parse(&narrative);
    println!("{}", formatter.format_sections(&sections)?);
    Ok(())
}
