use browser::Cookie;
use store::{Row, Value};

/// One cached browser identity: the user-agent fingerprint that keys it plus
/// the serialized cookie jar captured from its last live session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCredential {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub fingerprint: String,
    pub cookie_jar: String,
}

impl SessionCredential {
    /// Row layout: id, created_at, updated_at, fingerprint, cookie_jar.
    /// Columns a row never received come back as empty strings.
    pub(crate) fn from_row(row: &Row) -> Option<Self> {
        if row.len() != 5 {
            return None;
        }

        Some(Self {
            id: row[0].as_integer()?,
            created_at: text_or_empty(&row[1]),
            updated_at: text_or_empty(&row[2]),
            fingerprint: text_or_empty(&row[3]),
            cookie_jar: text_or_empty(&row[4]),
        })
    }

    /// A credential is worth replaying iff the fingerprint is present and
    /// the jar deserializes to a non-empty cookie list. An unparseable jar
    /// is invalid, not an error.
    pub fn is_valid(&self) -> bool {
        if self.fingerprint.is_empty() || self.cookie_jar.is_empty() {
            return false;
        }

        match serde_json::from_str::<Vec<Cookie>>(&self.cookie_jar) {
            Ok(cookies) => !cookies.is_empty(),
            Err(_) => false,
        }
    }

    pub fn cookies(&self) -> Result<Vec<Cookie>, serde_json::Error> {
        serde_json::from_str(&self.cookie_jar)
    }
}

fn text_or_empty(value: &Value) -> String {
    value.as_text().unwrap_or_default().to_string()
}
