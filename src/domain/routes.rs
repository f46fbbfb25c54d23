//! Sales routes
//!
//! Several route counters arrive as `""` when unset; they go through
//! [`lenient_int`] so an empty string reads as absent.

use super::values::lenient_int;
use serde::{Deserialize, Serialize};

/// Customer visited on a route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteClient {
    pub id_sucursal: i64,
    pub id_fuerza_ventas: i64,
    /// Attention mode code, e.g. `PRE`
    pub id_modo_atencion: String,
    pub id_ruta: i64,
    pub id_cliente: i64,
    #[serde(default)]
    pub razon_social: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub intercalacion_visita: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub intercalacion_entrega: Option<i64>,
    #[serde(default)]
    pub fecha_desde: Option<String>,
    #[serde(default)]
    pub fecha_hasta: Option<String>,
    #[serde(default)]
    pub fecha_ruta_desde: Option<String>,
}

/// Sales route with its visit and delivery schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id_sucursal: i64,
    #[serde(default)]
    pub des_sucursal: Option<String>,
    pub id_fuerza_ventas: i64,
    #[serde(default)]
    pub des_fuerza_ventas: Option<String>,
    pub id_modo_atencion: String,
    #[serde(default)]
    pub des_modo_atencion: Option<String>,
    pub id_ruta: i64,
    #[serde(default)]
    pub des_ruta: Option<String>,
    #[serde(default)]
    pub fecha_desde: Option<String>,
    #[serde(default)]
    pub fecha_hasta: Option<String>,
    #[serde(default)]
    pub anulado: Option<bool>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub id_personal: Option<i64>,
    #[serde(default)]
    pub des_personal: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub periodicidad_visita: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub semana_visita: Option<i64>,
    /// Weekdays as a comma list, e.g. `2,3,4`
    #[serde(default, rename = "dias_visita")]
    pub dias_visita: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub periodicidad_entrega: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub semana_entrega: Option<i64>,
    #[serde(default)]
    pub dias_entrega: Option<String>,
    #[serde(default)]
    pub cliente_rutas: Option<Vec<RouteClient>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_lenient_counters() {
        let route: Route = serde_json::from_value(json!({
            "idSucursal": 1,
            "idFuerzaVentas": 1,
            "idModoAtencion": "PRE",
            "idRuta": 40,
            "idPersonal": "",
            "periodicidadVisita": "1",
            "dias_visita": "2,4,6",
            "clienteRutas": [{
                "idSucursal": 1,
                "idFuerzaVentas": 1,
                "idModoAtencion": "PRE",
                "idRuta": 40,
                "idCliente": 2044,
                "intercalacionVisita": ""
            }]
        }))
        .unwrap();

        assert_eq!(route.id_personal, None);
        assert_eq!(route.periodicidad_visita, Some(1));
        assert_eq!(route.dias_visita.as_deref(), Some("2,4,6"));
        let clients = route.cliente_rutas.unwrap();
        assert_eq!(clients[0].intercalacion_visita, None);
    }

    #[test]
    fn test_route_rejects_numeric_attention_mode() {
        let result = serde_json::from_value::<Route>(json!({
            "idSucursal": 1,
            "idFuerzaVentas": 1,
            "idModoAtencion": 5,
            "idRuta": 40
        }));
        assert!(result.is_err());
    }
}
