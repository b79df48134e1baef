use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::dataset::Dataset;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),

    #[error("column `{0}` not found in header")]
    UnknownColumn(String),

    #[error("column selection needs a header row")]
    SelectionWithoutHeader,

    #[error("delimiter {0:?} is not a single ASCII character")]
    UnsupportedDelimiter(char),
}

/// How to split a delimited file into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: char,
    pub has_header: bool,
    /// Header names of the columns to keep; all columns when `None`.
    pub columns: Option<Vec<String>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            columns: None,
        }
    }
}

/// Reads a delimited file, one transaction per record. Each non-empty field of
/// the selected columns becomes an item.
pub fn load_delimited(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_delimited(file, options)?;
    tracing::debug!(path = %path.display(), records = dataset.len(), "loaded records");
    Ok(dataset)
}

/// Same as [`load_delimited`] over any reader. Quoted fields may span lines;
/// records may have fewer fields than the header. A header with no records
/// gives an empty dataset.
pub fn read_delimited<R: Read>(reader: R, options: &LoadOptions) -> Result<Dataset, LoadError> {
    if !options.has_header && options.columns.is_some() {
        return Err(LoadError::SelectionWithoutHeader);
    }
    let delimiter = u8::try_from(options.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(LoadError::UnsupportedDelimiter(options.delimiter))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(options.has_header)
        .flexible(true)
        .from_reader(reader);

    let selection = if options.has_header {
        select_columns(reader.headers()?, options.columns.as_deref())?
    } else {
        None
    };

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Vec<String> = match &selection {
            Some(columns) => columns
                .iter()
                .filter_map(|&column| record.get(column))
                .map(str::to_owned)
                .collect(),
            None => record.iter().map(str::to_owned).collect(),
        };
        records.push(fields);
    }

    Ok(Dataset::from_records(records))
}

fn select_columns(
    header: &StringRecord,
    wanted: Option<&[String]>,
) -> Result<Option<Vec<usize>>, LoadError> {
    let Some(wanted) = wanted else {
        return Ok(None);
    };
    wanted
        .iter()
        .map(|name| {
            header
                .iter()
                .position(|column| {
                    column.trim_start_matches(BYTE_ORDER_MARK).trim() == name.trim()
                })
                .ok_or_else(|| LoadError::UnknownColumn(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> LoadOptions {
        LoadOptions {
            columns: Some(names.iter().map(|name| name.to_string()).collect()),
            ..LoadOptions::default()
        }
    }

    #[test]
    fn test_quoted_fields() {
        let input = "a,b,c\n\"Napa, CA\",\"say \"\"hi\"\"\",x\n";
        let dataset = read_delimited(input.as_bytes(), &LoadOptions::default()).unwrap();

        assert_eq!(dataset.len(), 1);
        let dict = dataset.dictionary();
        assert!(dict.id("Napa, CA").is_some());
        assert!(dict.id("say \"hi\"").is_some());
        assert!(dict.id("x").is_some());
    }

    #[test]
    fn test_quoted_field_spanning_lines() {
        let input = "province,title\nCalifornia,\"Alpha\nReserve\"\nOregon,Beta\n";
        let dataset = read_delimited(input.as_bytes(), &LoadOptions::default()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert!(dataset.dictionary().id("Alpha\nReserve").is_some());
        assert_eq!(dataset.transactions()[1].len(), 2);
    }

    #[test]
    fn test_byte_order_mark_in_header() {
        let input = "\u{feff}province,variety\nOregon,Pinot Noir\n";
        let dataset = read_delimited(input.as_bytes(), &columns(&["province"])).unwrap();

        assert_eq!(dataset.len(), 1);
        assert!(dataset.dictionary().id("Oregon").is_some());
        assert!(dataset.dictionary().id("Pinot Noir").is_none());
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let dataset = read_delimited("a,b\n".as_bytes(), &LoadOptions::default()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_short_records_and_custom_delimiter() {
        let options = LoadOptions {
            delimiter: '\t',
            has_header: false,
            columns: None,
        };
        let dataset = read_delimited("a\tb\tc\nd\n".as_bytes(), &options).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.transactions()[1].len(), 1);
    }

    #[test]
    fn test_option_errors() {
        let no_header = LoadOptions {
            has_header: false,
            ..columns(&["a"])
        };
        assert!(matches!(
            read_delimited("a\n".as_bytes(), &no_header),
            Err(LoadError::SelectionWithoutHeader)
        ));

        let wide = LoadOptions {
            delimiter: '§',
            ..LoadOptions::default()
        };
        assert!(matches!(
            read_delimited("a\n".as_bytes(), &wide),
            Err(LoadError::UnsupportedDelimiter('§'))
        ));

        assert!(matches!(
            read_delimited("a,b\n1,2\n".as_bytes(), &columns(&["c"])),
            Err(LoadError::UnknownColumn(ref name)) if name == "c"
        ));
    }
}
