//! Marketing hierarchy: segment, channel, subchannel

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingSubchannel {
    pub id_subcanal_mkt: i64,
    pub des_subcanal_mkt: String,
    #[serde(default)]
    pub id_canal_mkt: Option<i64>,
    #[serde(default)]
    pub compania: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingChannel {
    pub id_canal_mkt: i64,
    pub des_canal_mkt: String,
    #[serde(default)]
    pub id_segmento_mkt: Option<i64>,
    #[serde(default)]
    pub compania: Option<bool>,
    #[serde(default, rename = "SubCanalesMkt")]
    pub subcanales_mkt: Option<Vec<MarketingSubchannel>>,
}

/// Root of the marketing hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingSegment {
    pub id_segmento_mkt: i64,
    pub des_segmento_mkt: String,
    #[serde(default)]
    pub compania: Option<bool>,
    #[serde(default, rename = "CanalesMkt")]
    pub canales_mkt: Option<Vec<MarketingChannel>>,
}
