use chrono::NaiveDate;
use serde::Deserialize;

/// Top level of the XRAS daily Kp series. The live feed carries more
/// metadata (version, tzone, stime and so on) which is ignored here;
/// only the error field and the entries matter for decoding.
#[derive(Deserialize)]
pub struct XrasKpReport {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub data: Vec<XrasKpEntry>,
}

/// One upstream calendar day. The eight slot fields hold stringified
/// numbers or the literal "null"; some feed builds emit real JSON null
/// instead, hence Option.
#[derive(Deserialize)]
pub struct XrasKpEntry {
    pub time: NaiveDate,
    #[serde(default)]
    pub max_kp: String,
    #[serde(default)]
    pub h00: Option<String>,
    #[serde(default)]
    pub h03: Option<String>,
    #[serde(default)]
    pub h06: Option<String>,
    #[serde(default)]
    pub h09: Option<String>,
    #[serde(default)]
    pub h12: Option<String>,
    #[serde(default)]
    pub h15: Option<String>,
    #[serde(default)]
    pub h18: Option<String>,
    #[serde(default)]
    pub h21: Option<String>,
}
