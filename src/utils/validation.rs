use crate::domain::model::FileMapping;
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

/// A bare file name: no directory components, so every output stays inside the output directory.
pub fn validate_plain_file_name(field_name: &str, file: &str) -> Result<()> {
    validate_non_empty_string(field_name, file)?;
    if file.contains('/') || file.contains('\\') || file == "." || file == ".." {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "Expected a file name without directory components".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_map(files: &[FileMapping], summary_file: &str) -> Result<()> {
    validate_plain_file_name("paths.summary_file", summary_file)?;
    validate_file_extension("paths.summary_file", summary_file, &["json"])?;

    let mut outputs = HashSet::new();
    for mapping in files {
        validate_plain_file_name("datasets.source", &mapping.source)?;
        validate_file_extension("datasets.source", &mapping.source, &["csv"])?;
        validate_plain_file_name("datasets.output", &mapping.output)?;
        validate_file_extension("datasets.output", &mapping.output, &["json"])?;

        if mapping.output == summary_file {
            return Err(EtlError::InvalidConfigValueError {
                field: "datasets.output".to_string(),
                value: mapping.output.clone(),
                reason: "Output would overwrite the summary file".to_string(),
            });
        }
        if !outputs.insert(mapping.output.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: "datasets.output".to_string(),
                value: mapping.output.clone(),
                reason: "Output file name is used by more than one dataset".to_string(),
            });
        }
    }

    Ok(())
}
