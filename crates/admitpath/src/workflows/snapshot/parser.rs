use serde::de::DeserializeOwned;
use std::io::Read;

/// Deserialize one CSV export. Columns are matched by header name, cells are
/// trimmed, empty cells land as `None` in optional fields, and columns the
/// record type does not name are ignored.
pub(crate) fn parse_records<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.deserialize::<T>() {
        records.push(record?);
    }

    Ok(records)
}
