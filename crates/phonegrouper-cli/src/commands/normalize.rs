use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use phonegrouper_core::{
    validate_country_code, validate_minimum_digit_count, NormalizerConfig,
};
use serde::Serialize;

/// Normalizer settings that override the config file for one run.
#[derive(Debug, Args)]
pub struct NormalizeOverrides {
    #[arg(long, allow_negative_numbers = true, help = "Minimum digits a number must keep")]
    pub min_digits: Option<i64>,
    #[arg(
        long,
        conflicts_with = "no_country_code",
        help = "Country code stripped from international numbers"
    )]
    pub country_code: Option<String>,
    #[arg(long, help = "Keep every country code")]
    pub no_country_code: bool,
    #[arg(long, help = "Strip national trunk zeros")]
    pub strip_leading_zero: bool,
}

impl NormalizeOverrides {
    pub fn apply(&self, config: &mut NormalizerConfig) -> Result<()> {
        if let Some(minimum) = self.min_digits {
            config.minimum_digit_count = validate_minimum_digit_count(minimum)?;
        }
        if let Some(code) = self.country_code.as_deref() {
            config.default_country_code = Some(validate_country_code(code)?);
        }
        if self.no_country_code {
            config.default_country_code = None;
        }
        if self.strip_leading_zero {
            config.strip_leading_zero = true;
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(required = true)]
    pub numbers: Vec<String>,
    #[command(flatten)]
    pub overrides: NormalizeOverrides,
}

#[derive(Debug, Serialize)]
struct NormalizedDto {
    raw: String,
    canonical: Option<String>,
    error: Option<String>,
}

pub fn normalize(ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let mut config = ctx.config.pipeline.normalizer.clone();
    args.overrides.apply(&mut config)?;
    config.validate()?;

    let results: Vec<NormalizedDto> = args
        .numbers
        .into_iter()
        .map(|raw| match config.normalize(&raw) {
            Ok(number) => NormalizedDto {
                raw,
                canonical: Some(number.into_string()),
                error: None,
            },
            Err(err) => NormalizedDto {
                raw,
                canonical: None,
                error: Some(err.to_string()),
            },
        })
        .collect();
    let failed = results.iter().filter(|r| r.error.is_some()).count();

    if ctx.json {
        print_json(&results)?;
    } else {
        for result in &results {
            match (&result.canonical, &result.error) {
                (Some(canonical), _) => println!("{}\t{}", result.raw, canonical),
                (None, Some(error)) => println!("{}\terror: {}", result.raw, error),
                (None, None) => println!("{}", result.raw),
            }
        }
    }

    if failed > 0 {
        return Err(invalid_input(format!(
            "{} number(s) could not be normalized",
            failed
        )));
    }
    Ok(())
}
