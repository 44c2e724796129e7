use crate::commands::normalize::NormalizeOverrides;
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use phonegrouper_config::{parse_delimiter, InputConfig, InputFormat, OutputConfig};
use phonegrouper_core::{
    arrange, validate_min_group_size, validate_suffix_digits, EquivalenceRule, GroupOrder,
    Grouping, Member, Pipeline, PipelineConfig, UnclassifiedPolicy,
};
use phonegrouper_format::parse::{read_records, read_rows};
use phonegrouper_format::render::{write_json_report, write_text_report};
use phonegrouper_format::source::source_for;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[arg(help = "Input file, or - for standard input")]
    pub input: PathBuf,
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    #[arg(long, help = "Column delimiter for --format columns")]
    pub delimiter: Option<String>,
    #[command(flatten)]
    pub normalize: NormalizeOverrides,
    #[arg(long, value_enum)]
    pub rule: Option<RuleArg>,
    #[arg(long, allow_negative_numbers = true, help = "Trailing digits compared by --rule suffix")]
    pub suffix_digits: Option<i64>,
    #[arg(long, value_enum)]
    pub unclassified: Option<UnclassifiedArg>,
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
    #[arg(long, allow_negative_numbers = true, help = "Hide groups with fewer records")]
    pub min_group_size: Option<i64>,
    #[arg(long, help = "Normalize on the calling thread only")]
    pub sequential: bool,
    #[arg(long, short, help = "Write the report to a file instead of stdout")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Plain,
    Columns,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RuleArg {
    Exact,
    Suffix,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnclassifiedArg {
    Group,
    Report,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    FirstSeen,
    SizeDesc,
}

#[derive(Debug, Serialize)]
struct GroupSummary {
    records: usize,
    groups: usize,
    unclassified: usize,
    elapsed_ms: u128,
}

struct Settings {
    pipeline: PipelineConfig,
    output: OutputConfig,
    input: InputConfig,
}

pub fn group(ctx: &Context<'_>, args: GroupArgs) -> Result<()> {
    let settings = resolve_settings(ctx, &args)?;
    let pipeline =
        Pipeline::new(settings.pipeline).with_context(|| "invalid grouping configuration")?;
    debug!(
        rule = pipeline.config().rule.as_str(),
        unclassified = pipeline.config().unclassified.as_str(),
        parallel_threshold = ?pipeline.config().parallel_threshold,
        "pipeline ready"
    );

    let source = source_for(&args.input);
    let started = Instant::now();
    let summary = match settings.input.format {
        InputFormat::Plain => {
            let records = read_records(source.as_ref())
                .with_context(|| format!("read {}", source.source_name()))?;
            debug!(records = records.len(), "records read");
            let grouping = pipeline.group_records(records);
            finish(ctx, &settings.output, args.output.as_deref(), grouping, started)?
        }
        InputFormat::Columns => {
            let rows = read_rows(source.as_ref(), settings.input.delimiter)
                .with_context(|| format!("read {}", source.source_name()))?;
            debug!(rows = rows.len(), "rows read");
            let grouping = pipeline.link_rows(rows);
            finish(ctx, &settings.output, args.output.as_deref(), grouping, started)?
        }
    };

    info!(
        records = summary.records,
        groups = summary.groups,
        unclassified = summary.unclassified,
        elapsed_ms = summary.elapsed_ms as u64,
        "grouping finished"
    );

    if args.output.is_some() {
        if ctx.json {
            print_json(&summary)?;
        } else {
            println!(
                "Processed {} record(s) into {} group(s) in {} ms",
                summary.records, summary.groups, summary.elapsed_ms
            );
        }
    }

    Ok(())
}

fn finish<T: Member>(
    ctx: &Context<'_>,
    output_config: &OutputConfig,
    output: Option<&Path>,
    mut grouping: Grouping<T>,
    started: Instant,
) -> Result<GroupSummary> {
    let records = grouping.record_count();
    arrange(
        &mut grouping,
        output_config.order,
        output_config.min_group_size,
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output file {}", path.display()))?;
            write_report(ctx, &mut BufWriter::new(file), &grouping)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_report(ctx, &mut stdout, &grouping)?;
        }
    }

    Ok(GroupSummary {
        records,
        groups: grouping.groups.len(),
        unclassified: grouping.unclassified_count(),
        elapsed_ms: started.elapsed().as_millis(),
    })
}

fn write_report<W: Write, T: Member>(
    ctx: &Context<'_>,
    writer: &mut W,
    grouping: &Grouping<T>,
) -> Result<()> {
    if ctx.json {
        write_json_report(writer, grouping)?;
    } else {
        write_text_report(writer, grouping)?;
    }
    Ok(())
}

fn resolve_settings(ctx: &Context<'_>, args: &GroupArgs) -> Result<Settings> {
    let mut pipeline = ctx.config.pipeline.clone();
    let mut output = ctx.config.output.clone();
    let mut input = ctx.config.input.clone();

    args.normalize.apply(&mut pipeline.normalizer)?;

    let suffix_digits = match args.suffix_digits {
        Some(digits) => validate_suffix_digits(digits)?,
        None => match pipeline.rule {
            EquivalenceRule::Suffix(current) => current,
            EquivalenceRule::Exact => ctx.config.suffix_digits,
        },
    };
    let use_suffix = match args.rule {
        Some(RuleArg::Suffix) => true,
        Some(RuleArg::Exact) => false,
        None => matches!(pipeline.rule, EquivalenceRule::Suffix(_)),
    };
    if args.suffix_digits.is_some() && !use_suffix {
        return Err(invalid_input("--suffix-digits requires the suffix rule"));
    }
    pipeline.rule = if use_suffix {
        EquivalenceRule::Suffix(suffix_digits)
    } else {
        EquivalenceRule::Exact
    };

    if let Some(unclassified) = args.unclassified {
        pipeline.unclassified = match unclassified {
            UnclassifiedArg::Group => UnclassifiedPolicy::Group,
            UnclassifiedArg::Report => UnclassifiedPolicy::Report,
        };
    }
    if args.sequential {
        pipeline.parallel_threshold = None;
    }

    if let Some(order) = args.order {
        output.order = match order {
            OrderArg::FirstSeen => GroupOrder::FirstSeen,
            OrderArg::SizeDesc => GroupOrder::SizeDesc,
        };
    }
    if let Some(size) = args.min_group_size {
        output.min_group_size = validate_min_group_size(size)?;
    }

    if let Some(format) = args.format {
        input.format = match format {
            FormatArg::Plain => InputFormat::Plain,
            FormatArg::Columns => InputFormat::Columns,
        };
    }
    if let Some(delimiter) = args.delimiter.as_deref() {
        input.delimiter = parse_delimiter(delimiter)?;
    }

    Ok(Settings {
        pipeline,
        output,
        input,
    })
}
