//! Format-name command - context-aware name formatting

use clap::Args;
use tracing::info;

use crate::domain::{NameComponents, NameFormat};
use crate::infrastructure::embedding::{create_embedding_provider, EmbeddingProviderType};
use crate::infrastructure::services::{FormattedName, NameFormatterService, SmartFormat};

/// Arguments for the format-name command
#[derive(Args, Clone, Debug)]
pub struct FormatNameArgs {
    /// Full name, e.g. "Dr. John Smith"
    #[arg(long)]
    pub name: String,

    /// Context to format for; repeat for several
    #[arg(long, required_unless_present_any = ["all", "format"])]
    pub context: Vec<String>,

    /// Render in this format: first_last, last_first, first_initial,
    /// formal_title or academic
    #[arg(long)]
    pub format: Option<NameFormat>,

    /// Print the name in every format
    #[arg(long)]
    pub all: bool,
}

pub async fn run(args: FormatNameArgs, provider: Option<EmbeddingProviderType>) -> anyhow::Result<()> {
    let config = super::bootstrap(provider)?;

    if args.all {
        for rendered in NameFormatterService::all_formats(&args.name) {
            println!("{}", all_formats_line(&rendered));
        }
    }

    if let Some(format) = args.format {
        println!("{}", fixed_format_line(format, &NameComponents::parse(&args.name)));
    }

    if args.context.is_empty() {
        return Ok(());
    }

    let embedding_provider = create_embedding_provider(&config.embedding)?;
    info!(provider = embedding_provider.provider_name(), "Starting name formatter");

    let service = NameFormatterService::new(embedding_provider, config.memo).await?;

    for context in &args.context {
        let result = service.smart_format(&args.name, context).await?;
        println!("{}", smart_format_line(context, &result));
    }

    Ok(())
}

fn all_formats_line(rendered: &FormattedName) -> String {
    format!(
        "{}\t{}\t(e.g. {})",
        rendered.format,
        rendered.formatted.as_deref().unwrap_or("<not applicable>"),
        rendered.example
    )
}

fn fixed_format_line(format: NameFormat, name: &NameComponents) -> String {
    format!(
        "{}\t{}",
        format,
        format.apply(name).as_deref().unwrap_or("<not applicable>")
    )
}

fn smart_format_line(context: &str, result: &SmartFormat) -> String {
    format!(
        "{}\t{}\t{}\t{:.3}{}",
        context,
        result.formatted.as_deref().unwrap_or("<not applicable>"),
        result.format,
        result.confidence,
        if result.cached { "\tcached" } else { "" }
    )
}
