//! Sales vouchers
//!
//! Header and line records returned by the `ventas/` endpoint. Wire names
//! follow the ChessERP definitions, including their misspellings
//! (`fechaComprobate`, `tipoConstribuyente`, `cantidadesCorCargo`).

use super::values::{IntOrText, NumberOrText};
use serde::{Deserialize, Serialize};

/// Detail line of a sales voucher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub id_linea: i64,
    pub id_articulo: i64,
    #[serde(default)]
    pub ds_articulo: Option<String>,
    #[serde(default)]
    pub id_concepto: Option<i64>,
    #[serde(default)]
    pub ds_concepto: Option<String>,
    #[serde(default)]
    pub es_combo: Option<String>,
    #[serde(default)]
    pub id_combo: Option<i64>,
    #[serde(default)]
    pub id_articulo_estadistico: Option<i64>,
    #[serde(default)]
    pub ds_articulo_estadistico: Option<String>,
    #[serde(default)]
    pub presentacion_articulo: Option<String>,

    // Quantities
    #[serde(default)]
    pub cantidad_por_pallets: Option<i64>,
    #[serde(default)]
    pub peso: Option<f64>,
    #[serde(default)]
    pub cantidad_solicitada: Option<f64>,
    #[serde(default)]
    pub unidades_solicitadas: Option<f64>,
    #[serde(default, rename = "cantidadesCorCargo")]
    pub cantidades_con_cargo: Option<f64>,
    #[serde(default)]
    pub cantidades_sin_cargo: Option<f64>,
    #[serde(default)]
    pub cantidades_total: Option<f64>,
    #[serde(default)]
    pub peso_total: Option<f64>,
    #[serde(default)]
    pub cantidades_rechazo: Option<f64>,
    #[serde(default, rename = "unimedcargo")]
    pub unimed_cargo: Option<f64>,
    #[serde(default, rename = "unimedscargo")]
    pub unimed_scargo: Option<f64>,
    #[serde(default, rename = "unimedtotal")]
    pub unimed_total: Option<f64>,

    // Prices
    #[serde(default)]
    pub precio_unitario_bruto: Option<f64>,
    #[serde(default)]
    pub bonificacion: Option<f64>,
    #[serde(default)]
    pub precio_unitario_neto: Option<f64>,
    #[serde(default, rename = "tipocambio")]
    pub tipo_cambio: Option<f64>,
    #[serde(default, rename = "motivocambio")]
    pub motivo_cambio: Option<String>,
    #[serde(default, rename = "descmotcambio")]
    pub desc_motivo_cambio: Option<String>,

    // Line totals and taxes
    #[serde(default)]
    pub subtotal_bruto: Option<f64>,
    #[serde(default)]
    pub subtotal_bonificado: Option<f64>,
    #[serde(default)]
    pub subtotal_neto: Option<f64>,
    #[serde(default)]
    pub subtotal_final: Option<f64>,
    #[serde(default)]
    pub iva21: Option<f64>,
    #[serde(default)]
    pub iva27: Option<f64>,
    #[serde(default)]
    pub iva105: Option<f64>,
    #[serde(default)]
    pub internos: Option<f64>,
    #[serde(default)]
    pub per3337: Option<f64>,
    #[serde(default)]
    pub percepcion212: Option<f64>,
    #[serde(default, rename = "percepcioniibb")]
    pub percepcion_iibb: Option<f64>,
}

/// Sales voucher header
///
/// Required fields mirror the ChessERP definition: company, document type,
/// letter, series, number, voucher date, branch and customer. Everything
/// else defaults to absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    // Company and document
    pub id_empresa: i64,
    #[serde(default)]
    pub ds_empresa: Option<String>,
    pub id_documento: IntOrText,
    #[serde(default)]
    pub ds_documento: Option<String>,
    pub letra: String,
    pub serie: IntOrText,
    #[serde(rename = "nrodoc")]
    pub nro_doc: i64,
    #[serde(default)]
    pub anulado: Option<bool>,
    #[serde(default)]
    pub id_mov_comercial: Option<i64>,
    #[serde(default)]
    pub ds_mov_comercial: Option<String>,
    #[serde(default)]
    pub id_rechazo: Option<i64>,
    #[serde(default)]
    pub ds_rechazo: Option<String>,

    // Dates
    #[serde(rename = "fechaComprobate")]
    pub fecha_comprobante: String,
    #[serde(default)]
    pub fecha_alta: Option<String>,
    #[serde(default)]
    pub usuario_alta: Option<String>,
    #[serde(default)]
    pub fecha_vencimiento: Option<String>,
    #[serde(default)]
    pub fecha_entrega: Option<String>,

    // Organization
    pub id_sucursal: i64,
    #[serde(default)]
    pub ds_sucursal: Option<String>,
    #[serde(default)]
    pub id_fuerza_ventas: Option<i64>,
    #[serde(default)]
    pub ds_fuerza_ventas: Option<String>,
    #[serde(default)]
    pub id_deposito: Option<i64>,
    #[serde(default)]
    pub ds_deposito: Option<String>,
    #[serde(default)]
    pub id_vendedor: Option<i64>,
    #[serde(default)]
    pub ds_vendedor: Option<String>,
    #[serde(default)]
    pub id_supervisor: Option<i64>,
    #[serde(default)]
    pub ds_supervisor: Option<String>,
    #[serde(default)]
    pub id_gerente: Option<i64>,
    #[serde(default)]
    pub ds_gerente: Option<String>,

    // Customer
    pub id_cliente: i64,
    #[serde(default)]
    pub nombre_cliente: Option<String>,
    #[serde(default)]
    pub domicilio_cliente: Option<String>,
    #[serde(default)]
    pub codigo_postal: Option<IntOrText>,
    #[serde(default)]
    pub id_localidad: Option<i64>,
    #[serde(default)]
    pub ds_localidad: Option<String>,
    #[serde(default)]
    pub id_provincia: Option<IntOrText>,
    #[serde(default)]
    pub ds_provincia: Option<String>,
    #[serde(default, rename = "tipoConstribuyente")]
    pub tipo_contribuyente: Option<IntOrText>,
    #[serde(default, rename = "dsTipoConstribuyente")]
    pub ds_tipo_contribuyente: Option<String>,

    // Payment and cash desk
    #[serde(default)]
    pub id_tipo_pago: Option<i64>,
    #[serde(default)]
    pub ds_tipo_pago: Option<String>,
    #[serde(default)]
    pub fecha_pago: Option<String>,
    #[serde(default)]
    pub id_caja: Option<i64>,
    #[serde(default)]
    pub fecha_caja: Option<String>,
    #[serde(default)]
    pub cajero: Option<IntOrText>,

    // Logistics and origin order
    #[serde(default)]
    pub planilla_carga: Option<String>,
    #[serde(default)]
    pub id_fletero_carga: Option<i64>,
    #[serde(default)]
    pub ds_fletero_carga: Option<String>,
    #[serde(default)]
    pub id_pedido: Option<IntOrText>,
    #[serde(default)]
    pub fecha_pedido: Option<String>,
    #[serde(default)]
    pub origen: Option<String>,

    // Segmentation
    #[serde(default)]
    pub id_negocio: Option<i64>,
    #[serde(default)]
    pub ds_negocio: Option<String>,
    #[serde(default)]
    pub id_agrupacion: Option<i64>,
    #[serde(default)]
    pub ds_agrupacion: Option<String>,
    #[serde(default)]
    pub id_area: Option<i64>,
    #[serde(default)]
    pub ds_area: Option<String>,
    #[serde(default)]
    pub id_segmento_mkt: Option<i64>,
    #[serde(default)]
    pub ds_segmento_mkt: Option<String>,
    #[serde(default)]
    pub id_canal_mkt: Option<i64>,
    #[serde(default)]
    pub ds_canal_mkt: Option<String>,
    #[serde(default)]
    pub id_subcanal_mkt: Option<i64>,
    #[serde(default, rename = "ds SegmentoMkt")]
    pub ds_subcanal_mkt: Option<String>,

    // Accounting
    #[serde(default)]
    pub fecha_asiento_contable: Option<String>,
    #[serde(default)]
    pub nro_asiento_contable: Option<i64>,
    #[serde(default)]
    pub nro_plan_contable: Option<i64>,
    #[serde(default)]
    pub cod_cuenta_contable: Option<i64>,
    #[serde(default)]
    pub id_centro_costo: Option<i64>,
    #[serde(default)]
    pub ds_cuenta_contable: Option<String>,

    // Totals and taxes
    #[serde(default)]
    pub subtotal_bruto: Option<f64>,
    #[serde(default)]
    pub subtotal_bonificado: Option<f64>,
    #[serde(default)]
    pub subtotal_neto: Option<f64>,
    #[serde(default)]
    pub subtotal_final: Option<f64>,
    #[serde(default)]
    pub iva21: Option<f64>,
    #[serde(default)]
    pub iva27: Option<f64>,
    #[serde(default)]
    pub iva105: Option<f64>,
    #[serde(default)]
    pub internos: Option<f64>,
    #[serde(default)]
    pub per3337: Option<f64>,
    #[serde(default)]
    pub iva2: Option<f64>,
    #[serde(default)]
    pub percepcion212: Option<f64>,
    #[serde(default, rename = "percepcioniibb")]
    pub percepcion_iibb: Option<f64>,
    #[serde(default, rename = "persiibbd")]
    pub pers_iibb_d: Option<NumberOrText>,
    #[serde(default, rename = "persiibbr")]
    pub pers_iibb_r: Option<NumberOrText>,

    // Trade spend
    #[serde(default, rename = "tradespendg")]
    pub trade_spend_g: Option<NumberOrText>,
    #[serde(default, rename = "tradespends")]
    pub trade_spend_s: Option<NumberOrText>,
    #[serde(default, rename = "tradespendb")]
    pub trade_spend_b: Option<NumberOrText>,
    #[serde(default, rename = "tradespendi")]
    pub trade_spend_i: Option<NumberOrText>,
    #[serde(default, rename = "tradespendp")]
    pub trade_spend_p: Option<NumberOrText>,
    #[serde(default, rename = "tradespendt")]
    pub trade_spend_t: Option<NumberOrText>,
    #[serde(default, rename = "totradspend")]
    pub total_trade_spend: Option<f64>,
    #[serde(default)]
    pub acciones: Option<String>,

    // Fiscal
    #[serde(default, rename = "numerosserie")]
    pub numeros_serie: Option<IntOrText>,
    #[serde(default, rename = "numerosactivo")]
    pub numeros_activo: Option<IntOrText>,
    #[serde(default, rename = "cuentayorden")]
    pub cuenta_y_orden: Option<IntOrText>,
    #[serde(default, rename = "codprovcyo")]
    pub cod_prov_cyo: Option<i64>,
    #[serde(default, rename = "descrip")]
    pub descrip_cyo: Option<String>,
    #[serde(default, rename = "nrorendcyo")]
    pub nro_rend_cyo: Option<i64>,
    #[serde(default)]
    pub id_tipo_cambio: Option<i64>,
    #[serde(default)]
    pub ds_tipo_cambio: Option<String>,
    #[serde(default)]
    pub timbrado: Option<i64>,
    #[serde(default)]
    pub cfdi_emitido: Option<String>,
    #[serde(default)]
    pub regimen_fiscal: Option<IntOrText>,
    #[serde(default)]
    pub informado: Option<IntOrText>,
    #[serde(default, rename = "firmadigital")]
    pub firma_digital: Option<String>,
    #[serde(default)]
    pub proveedor: Option<String>,
    #[serde(default, rename = "preciocomprabr")]
    pub precio_compra_br: Option<f64>,
    #[serde(default, rename = "preciocomprant")]
    pub precio_compra_nt: Option<f64>,
    #[serde(default)]
    pub linea_credito: Option<IntOrText>,
    #[serde(default)]
    pub estado_fiscal: Option<i64>,
    #[serde(default)]
    pub numeracion_fiscal: Option<IntOrText>,

    #[serde(default, rename = "líneas del venta")]
    pub lines: Option<Vec<SaleLine>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sale_json() -> serde_json::Value {
        json!({
            "idEmpresa": 1,
            "idDocumento": "FCVTA",
            "letra": "A",
            "serie": "0003",
            "nrodoc": 15432,
            "fechaComprobate": "2025-01-14",
            "idSucursal": 1,
            "idCliente": 2044,
            "codigoPostal": "4400",
            "subtotalFinal": 1500.5,
            "líneas del venta": [
                {"idLinea": 1, "idArticulo": 100, "cantidadesCorCargo": 2.0},
                {"idLinea": 2, "idArticulo": 101}
            ]
        })
    }

    #[test]
    fn test_sale_parses_wire_names() {
        let sale: Sale = serde_json::from_value(sale_json()).unwrap();
        assert_eq!(sale.nro_doc, 15432);
        assert_eq!(sale.fecha_comprobante, "2025-01-14");
        assert_eq!(sale.serie, IntOrText::Text("0003".to_string()));
        assert_eq!(sale.id_documento, IntOrText::Text("FCVTA".to_string()));
        assert_eq!(sale.codigo_postal, Some(IntOrText::Int(4400)));

        let lines = sale.lines.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].cantidades_con_cargo, Some(2.0));
        assert_eq!(lines[1].cantidades_con_cargo, None);
    }

    #[test]
    fn test_sale_missing_required_field_fails() {
        let mut raw = sale_json();
        raw.as_object_mut().unwrap().remove("nrodoc");
        assert!(serde_json::from_value::<Sale>(raw).is_err());
    }

    #[test]
    fn test_sale_serializes_back_to_wire_names() {
        let sale: Sale = serde_json::from_value(sale_json()).unwrap();
        let value = serde_json::to_value(&sale).unwrap();
        assert_eq!(value["fechaComprobate"], json!("2025-01-14"));
        assert_eq!(value["ds SegmentoMkt"], json!(null));
        assert!(value.get("líneas del venta").is_some());
    }
}
