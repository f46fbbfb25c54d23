//! Articles and physical stock

use super::values::IntOrText;
use serde::{Deserialize, Serialize};

/// Returnable container linked to an article grouping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRelation {
    #[serde(default)]
    pub id_articulo: Option<i64>,
    #[serde(default)]
    pub id_art_retornable: Option<i64>,
    #[serde(default)]
    pub des_art_retornable: Option<String>,
    #[serde(default)]
    pub cantidad_relacion: Option<i64>,
    #[serde(default)]
    pub solo_bulto_cerrado: Option<i64>,
}

/// Classification of an article under one grouping scheme (brand, generic...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleGrouping {
    #[serde(default)]
    pub id_forma_agrupar: Option<String>,
    #[serde(default)]
    pub des_forma_agrupar: Option<String>,
    #[serde(default)]
    pub id_articulo: Option<i64>,
    #[serde(default)]
    pub id_agrupacion: Option<i64>,
    #[serde(default)]
    pub des_agrupacion: Option<String>,
    #[serde(default)]
    pub relavacio: Option<Vec<ContainerRelation>>,
}

/// Article master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id_articulo: i64,
    pub des_articulo: String,
    #[serde(default)]
    pub desc_detallada: Option<String>,
    #[serde(default)]
    pub unidades_bulto: Option<i64>,
    #[serde(default)]
    pub anulado: Option<bool>,
    #[serde(default)]
    pub fecha_alta: Option<String>,
    #[serde(default)]
    pub factor_venta: Option<String>,
    #[serde(default)]
    pub minimo_venta: Option<i64>,

    #[serde(default)]
    pub pesable: Option<bool>,
    #[serde(default)]
    pub peso_cota_superior: Option<i64>,
    #[serde(default)]
    pub peso_cota_inferior: Option<i64>,
    #[serde(default)]
    pub es_combo: Option<bool>,
    #[serde(default)]
    pub detalle_combo_imp: Option<i64>,
    #[serde(default)]
    pub detalle_combo_inf: Option<String>,

    // Taxes
    #[serde(default)]
    pub exento_iva: Option<bool>,
    #[serde(default)]
    pub inafecto: Option<bool>,
    #[serde(default)]
    pub exonerado: Option<bool>,
    #[serde(default)]
    pub iva_diferencial: Option<bool>,
    #[serde(default)]
    pub tasa_iva: Option<f64>,
    #[serde(default)]
    pub tasa_internos: Option<f64>,
    #[serde(default)]
    pub internos_bulto: Option<f64>,
    #[serde(default)]
    pub tasa_iibb: Option<f64>,

    #[serde(default)]
    pub es_alcoholico: Option<bool>,
    #[serde(default)]
    pub visible_mobile: Option<bool>,
    #[serde(default)]
    pub es_comodatable: Option<bool>,
    #[serde(default)]
    pub des_corta_articulo: Option<String>,

    // Presentation. The vendor documents the descriptions as integers.
    #[serde(default)]
    pub id_presentacion_bulto: Option<i64>,
    #[serde(default)]
    pub des_presentacion_bulto: Option<IntOrText>,
    #[serde(default)]
    pub id_presentacion_unidad: Option<i64>,
    #[serde(default)]
    pub des_presentacion_unidad: Option<IntOrText>,
    #[serde(default)]
    pub id_unidad_medida: Option<i64>,
    #[serde(default)]
    pub des_unidad_medida: Option<IntOrText>,
    #[serde(default)]
    pub valor_unidad_medida: Option<f64>,

    // Logistics
    #[serde(default)]
    pub id_articulo_estadistico: Option<i64>,
    #[serde(default)]
    pub cod_barra_bulto: Option<IntOrText>,
    #[serde(default)]
    pub cod_barra_unidad: Option<IntOrText>,
    #[serde(default)]
    pub tiene_retornables: Option<bool>,
    #[serde(default)]
    pub bultos_pallet: Option<i64>,
    #[serde(default)]
    pub pisos_pallet: Option<i64>,
    #[serde(default)]
    pub apilabilidad: Option<i64>,
    #[serde(default)]
    pub peso_bulto: Option<f64>,
    #[serde(default)]
    pub lleva_frescura: Option<bool>,

    #[serde(default)]
    pub dias_bloqueo: Option<i64>,
    #[serde(default)]
    pub politica_stock: Option<i64>,
    #[serde(default)]
    pub dias_ventana: Option<i64>,
    #[serde(default)]
    pub es_activo_fijo: Option<i64>,
    #[serde(default)]
    pub cantidad_puertas: Option<i64>,
    #[serde(default)]
    pub unidades_frente: Option<i64>,
    #[serde(default)]
    pub litros_repago: Option<f64>,
    #[serde(default)]
    pub id_art_usado: Option<i64>,
    #[serde(default)]
    pub anios_amortizacion: Option<i64>,

    #[serde(default, rename = "eAgrupaciones")]
    pub agrupaciones: Option<Vec<ArticleGrouping>>,
}

/// Physical stock of one article in one deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    #[serde(default)]
    pub fecha: Option<String>,
    pub id_deposito: i64,
    #[serde(default)]
    pub id_almacen: Option<i64>,
    pub id_articulo: i64,
    #[serde(default)]
    pub ds_articulo: Option<String>,
    #[serde(default)]
    pub fec_vto_lote: Option<String>,
    pub cant_bultos: f64,
    pub cant_unidades: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_with_nested_groupings() {
        let article: Article = serde_json::from_value(json!({
            "idArticulo": 100,
            "desArticulo": "AGUA 500ML",
            "codBarraUnidad": "7790001000012",
            "eAgrupaciones": [{
                "idFormaAgrupar": "MARCA",
                "idAgrupacion": 7,
                "relavacio": [{"idArtRetornable": 900, "cantidadRelacion": 6}]
            }]
        }))
        .unwrap();

        assert_eq!(article.cod_barra_unidad, Some(IntOrText::Int(7790001000012)));
        let groupings = article.agrupaciones.unwrap();
        assert_eq!(groupings[0].id_forma_agrupar.as_deref(), Some("MARCA"));
        let relations = groupings[0].relavacio.as_ref().unwrap();
        assert_eq!(relations[0].id_art_retornable, Some(900));
    }

    #[test]
    fn test_stock_record_requires_quantities() {
        let ok: StockRecord = serde_json::from_value(json!({
            "idDeposito": 1,
            "idArticulo": 100,
            "cantBultos": 12,
            "cantUnidades": 3.5
        }))
        .unwrap();
        assert_eq!(ok.fecha, None);
        assert_eq!(ok.cant_bultos, 12.0);

        let missing = serde_json::from_value::<StockRecord>(json!({
            "idDeposito": 1,
            "idArticulo": 100,
            "cantBultos": 12
        }));
        assert!(missing.is_err());
    }
}
