use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct DohQueryParams {
    pub dns: Option<String>,
}
