//! Commercial staff

use serde::{Deserialize, Serialize};

/// Member of the commercial staff (sellers, supervisors, managers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id_sucursal: i64,
    #[serde(default)]
    pub des_sucursal: Option<String>,
    pub id_personal: i64,
    pub des_personal: String,
    #[serde(default)]
    pub id_fuerza_ventas: Option<i64>,
    #[serde(default)]
    pub des_fuerza_ventas: Option<String>,
    #[serde(default)]
    pub cargo: Option<String>,
    #[serde(default)]
    pub tipo_venta: Option<String>,
    #[serde(default)]
    pub id_personal_superior: Option<i64>,
    #[serde(default)]
    pub des_personal_superior: Option<String>,
    #[serde(default)]
    pub domicilio: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    #[serde(default)]
    pub usuario_sistema: Option<String>,
    #[serde(default)]
    pub id_tipo_segmento: Option<i64>,
    #[serde(default)]
    pub des_tipo_segmento: Option<String>,
}
