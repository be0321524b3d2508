/// Column schemas for `--output-type text`.
///
/// Each schema belongs to exactly one operation family and must track the
/// payload shape that operation returns.
use serde_json::Value;

use super::output::OutputError;
use crate::api::Operation;

/// Where the table rows live in a payload.
#[derive(Debug, Clone, Copy)]
pub enum Rows {
    /// An array reached by following these keys from the root (empty = root).
    At(&'static [&'static str]),
    /// The root object is the only row.
    Single,
}

/// One table column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    /// Key path inside a row object.
    pub field: &'static [&'static str],
    /// Fixed column width, padding included.
    pub width: u16,
}

/// A fixed-column projection of a payload.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub rows: Rows,
    pub columns: &'static [Column],
}

const fn col(header: &'static str, field: &'static [&'static str], width: u16) -> Column {
    Column {
        header,
        field,
        width,
    }
}

pub static DOMAIN_LIST: TableSchema = TableSchema {
    rows: Rows::At(&["domains", "domain"]),
    columns: &[
        col("Config Name", &["configuration-details", "configuration-name"], 32),
        col("HostName", &["configuration-details", "hostname"], 32),
        col("Reporting CP Code", &["configuration-details", "reporting-cpcode"], 20),
    ],
};

pub static STREAM_LIST: TableSchema = TableSchema {
    rows: Rows::At(&["streams", "stream"]),
    columns: &[
        col("StreamID", &["stream-id"], 32),
        col("Type", &["stream-type"], 32),
        col("Name", &["stream-name"], 17),
    ],
};

pub static MSL_STREAM_LIST: TableSchema = TableSchema {
    rows: Rows::At(&["streams"]),
    columns: &[
        col("ID", &["id"], 17),
        col("Name", &["name"], 32),
        col("Format", &["format"], 17),
        col("CPcode", &["cpcode"], 17),
        col("Origin", &["originHostName"], 42),
        col("CreatedDate", &["createdDate"], 32),
        col("ModifiedDate", &["modifiedDate"], 32),
        col("DVR Window", &["dvrWindowInMin"], 17),
        col("Encoder Location", &["encoderZone"], 18),
    ],
};

pub static MSL_STREAM: TableSchema = TableSchema {
    rows: Rows::Single,
    columns: &[
        col("ID", &["id"], 10),
        col("Name", &["name"], 12),
        col("Format", &["format"], 10),
        col("CPcode", &["cpcode"], 10),
        col("Origin", &["origin", "hostName"], 32),
        col("CreatedDate", &["createdDate"], 27),
        col("ModifiedDate", &["modifiedDate"], 27),
        col("Storage CP Code", &["storageGroup", "cpcode"], 17),
        col("Encoder Location", &["encoderZone"], 18),
        col("Primary URL", &["primaryPublishingUrl"], 32),
        col("Backup URL", &["backupPublishingUrl"], 32),
        col("Allowed IPs", &["allowedIps"], 32),
    ],
};

pub static CDN_LIST: TableSchema = TableSchema {
    rows: Rows::At(&[]),
    columns: &[col("Code", &["code"], 17), col("CDN Name", &["name"], 17)],
};

pub static CPCODE_LIST: TableSchema = TableSchema {
    rows: Rows::At(&[]),
    columns: &[
        col("CPcode", &["id"], 17),
        col("Name", &["name"], 17),
        col("ContractId", &["contractIds"], 32),
    ],
};

/// The text schema for an operation, if it has one.
///
/// Operations without a schema are printed as JSON in text mode.
#[must_use]
pub fn for_operation(operation: &Operation) -> Option<&'static TableSchema> {
    match operation {
        Operation::ListDomains => Some(&DOMAIN_LIST),
        Operation::ListStreams { .. } => Some(&STREAM_LIST),
        Operation::ListMslStreams => Some(&MSL_STREAM_LIST),
        Operation::GetMslStream { .. } => Some(&MSL_STREAM),
        Operation::ListCdns => Some(&CDN_LIST),
        Operation::ListCpcodes { .. } => Some(&CPCODE_LIST),
        Operation::ListEvents { .. }
        | Operation::GetEvent { .. }
        | Operation::ListRtmpConfigs
        | Operation::ListRtmpStreams
        | Operation::ListStorageGroups
        | Operation::GetDomain { .. }
        | Operation::GetStream { .. }
        | Operation::GetRtmpConfig { .. }
        | Operation::GetRtmpStream { .. } => None,
    }
}

impl TableSchema {
    /// Header labels, in column order.
    #[must_use]
    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.header)
    }

    /// Project `payload` into rows of cell text.
    ///
    /// # Errors
    ///
    /// - `OutputError::MissingField`: a rows path or column field is absent
    /// - `OutputError::UnexpectedShape`: the rows path is not an array
    pub fn project(&self, payload: &Value) -> Result<Vec<Vec<String>>, OutputError> {
        let rows: Vec<&Value> = match self.rows {
            Rows::Single => vec![payload],
            Rows::At(path) => {
                let value = lookup(payload, path).ok_or_else(|| OutputError::MissingField {
                    field: field_name(path),
                })?;
                let array = value.as_array().ok_or_else(|| OutputError::UnexpectedShape {
                    field: field_name(path),
                })?;
                array.iter().collect()
            }
        };

        rows.into_iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| {
                        lookup(row, column.field).map(cell_text).ok_or_else(|| {
                            OutputError::MissingField {
                                field: field_name(column.field),
                            }
                        })
                    })
                    .collect::<Result<Vec<String>, OutputError>>()
            })
            .collect()
    }
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(key))
}

fn field_name(path: &[&str]) -> String {
    if path.is_empty() {
        "<root>".to_owned()
    } else {
        path.join(".")
    }
}

/// Strings print bare; everything else prints as compact JSON.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
