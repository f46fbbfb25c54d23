//! Customer orders

use super::values::IntOrText;
use serde::{Deserialize, Serialize};

/// Detail line of an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id_linea_detalle: i64,
    #[serde(default)]
    pub id_motivo_cambio: Option<i64>,
    pub id_articulo: i64,
    #[serde(default)]
    pub cant_bultos: Option<f64>,
    #[serde(default)]
    pub cant_unidades: Option<f64>,
    #[serde(default)]
    pub peso_kilos: Option<f64>,
    #[serde(default)]
    pub precio_unitario: Option<f64>,
    #[serde(default)]
    pub bonificacion: Option<f64>,
}

/// Order header
///
/// Order ids look like `NXB-15-2516938` and user ids are user names, so
/// those identifiers are modelled as [`IntOrText`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id_pedido: IntOrText,
    pub origen: String,
    pub id_usuario: IntOrText,
    pub id_empresa: i64,
    pub id_sucursal: i64,
    #[serde(default)]
    pub id_fuerza_ventas: Option<i64>,
    #[serde(default)]
    pub id_deposito: Option<i64>,
    #[serde(default)]
    pub id_forma_pago: Option<i64>,
    #[serde(default)]
    pub id_tipo_documento: Option<IntOrText>,
    pub id_cliente: i64,
    #[serde(default)]
    pub id_alias_cliente: Option<i64>,
    #[serde(default)]
    pub fecha_entrega: Option<String>,
    #[serde(default)]
    pub id_vendedor: Option<i64>,
    #[serde(default)]
    pub id_modo_atencion: Option<IntOrText>,
    #[serde(default, rename = "líneas del pedido")]
    pub lineas: Option<Vec<OrderLine>>,
}
