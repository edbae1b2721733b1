//! The advise command.

use crate::{AdviseArgs, Formatter, Result, EMBED_DIM};
use ethos_embedding::HashEmbedder;
use ethos_llm::{MockGenerator, OllamaGenerator};
use ethos_pipeline::{CaseAdvisor, PipelineConfig};
use ethos_store::SqliteKnowledgeBase;

/// Run the full advisory pipeline and print the validated advice
pub async fn execute_advise(
    args: AdviseArgs,
    db: &str,
    config: PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let narrative = args.narrative()?;
    let kb = SqliteKnowledgeBase::open(db)?;
    let model = HashEmbedder::new(EMBED_DIM);

    let advice = if args.mock {
        let advisor = CaseAdvisor::new(config, &kb, model, MockGenerator::default())?;
        advisor.advise(&narrative).await?
    } else {
        let generator = OllamaGenerator::new(&args.endpoint, &args.model)?;
        let advisor = CaseAdvisor::new(config, &kb, model, generator)?;
        advisor.advise(&narrative).await?
    };

    println!("{}", formatter.format_advice(&advice)?);
    Ok(())
}
