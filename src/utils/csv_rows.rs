//! Row parser for the batch upload format
//!
//! The upload format has no header row and three unquoted, comma separated
//! columns: biller GUID, web service key, invoice number. Every non-blank line
//! is data, including a header line if the user left one in.

/// One data line of an upload. Fields beyond the line's comma count are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub biller_guid: Option<String>,
    pub web_service_key: Option<String>,
    pub invoice_number: Option<String>,
}

/// Split raw upload text into trimmed rows, skipping blank lines.
/// Fields after the third are ignored.
pub fn parse_rows(text: &str) -> impl Iterator<Item = CsvRow> + '_ {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.split(',').map(|field| field.trim().to_string());
            CsvRow {
                biller_guid: fields.next(),
                web_service_key: fields.next(),
                invoice_number: fields.next(),
            }
        })
}
