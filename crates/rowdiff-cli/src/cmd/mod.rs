/// Command module for the `rowdiff` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes parsed inputs and returns `Ok(())` on success or a
/// [`crate::error::CliError`] on failure. Shared flag handling lives here.
use rowdiff_core::{FieldSpec, OneOrMany, SourceConfig, SourceOptions};

use crate::cli::SourceArgs;
use crate::error::CliError;
use crate::io::ReadOptions;

pub mod diff;
pub mod inspect;

/// Builds the source configuration from the shared source flags.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] for a malformed `FIELD=REGEX` pair
/// and [`CliError::Config`] for an invalid key layout or filter pattern.
pub fn source_config(args: &SourceArgs) -> Result<SourceConfig, CliError> {
    let options = SourceOptions {
        key_fields: specs(&args.key_field),
        parent_fields: specs(&args.parent_field),
        child_fields: specs(&args.child_field),
        field_names: args.field_names.clone(),
        case_sensitive: Some(!args.ignore_case),
        trim_whitespace: Some(args.trim),
        ignore_header: Some(args.ignore_header),
        include: filter_pairs(&args.include)?.into_iter().collect(),
        exclude: filter_pairs(&args.exclude)?.into_iter().collect(),
        ..SourceOptions::default()
    };
    Ok(SourceConfig::try_from(options)?)
}

/// Reading options for one input.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] if the delimiter is not a single
/// ASCII character.
pub fn read_options(args: &SourceArgs, max_size: u64) -> Result<ReadOptions<'_>, CliError> {
    let delimiter = u8::try_from(args.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| CliError::InvalidArgument {
            detail: format!("delimiter {:?} must be a single ASCII character", args.delimiter),
        })?;
    Ok(ReadOptions {
        format: args.input_format,
        delimiter,
        sheet: args.sheet.as_deref(),
        max_size,
    })
}

fn specs(values: &[String]) -> Option<OneOrMany> {
    if values.is_empty() {
        None
    } else {
        Some(OneOrMany::Many(
            values.iter().map(|v| FieldSpec::parse(v)).collect(),
        ))
    }
}

/// Splits `FIELD=REGEX` arguments at the first `=`.
fn filter_pairs(values: &[String]) -> Result<Vec<(String, String)>, CliError> {
    values
        .iter()
        .map(|value| match value.split_once('=') {
            Some((field, pattern)) if !field.is_empty() => {
                Ok((field.to_owned(), pattern.to_owned()))
            }
            Some(_) | None => Err(CliError::InvalidArgument {
                detail: format!("expected FIELD=REGEX, got {value:?}"),
            }),
        })
        .collect()
}
