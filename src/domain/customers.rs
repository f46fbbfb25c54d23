//! Customer master records
//!
//! A customer owns aliases (`cliente alias`); each alias owns its
//! sales-force assignments (`Clifuerza`).

use super::values::IntOrText;
use serde::{Deserialize, Serialize};

/// Assignment of a customer to a sales force, route and visit schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesForceAssignment {
    #[serde(default)]
    pub id_sucursal: Option<i64>,
    #[serde(default)]
    pub id_cliente: Option<i64>,
    #[serde(default)]
    pub id_fuerza_ventas: Option<i64>,
    #[serde(default)]
    pub des_fuerza_venta: Option<String>,
    #[serde(default)]
    pub id_modo_atencion: Option<IntOrText>,
    #[serde(default)]
    pub des_modo_atencion: Option<String>,
    #[serde(default)]
    pub fecha_inicio_fuerza: Option<String>,
    #[serde(default)]
    pub fecha_fin_fuerza: Option<String>,
    #[serde(default)]
    pub id_ruta: Option<i64>,
    #[serde(default)]
    pub fecha_ruta_venta: Option<String>,
    #[serde(default)]
    pub anulado: Option<bool>,
    #[serde(default)]
    pub periodicidad_visita: Option<i64>,
    #[serde(default)]
    pub semana_visita: Option<i64>,
    #[serde(default)]
    pub dias_visita: Option<IntOrText>,
    #[serde(default)]
    pub intercalacion_visita: Option<i64>,
    #[serde(default)]
    pub perioricidad_entrega: Option<i64>,
    #[serde(default)]
    pub semana_entrega: Option<i64>,
    #[serde(default)]
    pub dias_entrega: Option<IntOrText>,
    #[serde(default)]
    pub intercalacion_entrega: Option<i64>,
    #[serde(default, rename = "Horarios")]
    pub horarios: Option<String>,
}

/// Fiscal identity of a customer at a point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAlias {
    pub id_cliente: i64,
    pub id_alias: i64,
    #[serde(default)]
    pub fecha_hora_alta: Option<String>,
    #[serde(default)]
    pub anulado: Option<bool>,
    #[serde(default)]
    pub id_tipo_persona: Option<i64>,
    #[serde(default)]
    pub apellido_paterno: Option<String>,
    #[serde(default)]
    pub apellido_materno: Option<String>,
    #[serde(default)]
    pub nombres: Option<String>,
    #[serde(default)]
    pub razon_social: Option<String>,
    #[serde(default)]
    pub fantasia_social: Option<String>,
    #[serde(default)]
    pub id_tipo_contribuyente: Option<i64>,
    #[serde(default)]
    pub des_tipo_contribuyente: Option<String>,
    #[serde(default)]
    pub id_tipo_identificador: Option<i64>,
    #[serde(default)]
    pub des_tipo_identificador: Option<String>,
    #[serde(default)]
    pub identificador: Option<IntOrText>,
    #[serde(default)]
    pub vencimiento_identificador: Option<IntOrText>,
    #[serde(default)]
    pub es_exento_iibb: Option<bool>,
    #[serde(default)]
    pub fecha_vencimiento_exencion_iibb: Option<String>,
    #[serde(default)]
    pub es_inscripto_iibb: Option<bool>,
    #[serde(default)]
    pub numero_inscripcion_iibb: Option<IntOrText>,
    #[serde(default)]
    pub es_agente_percepcion_iibb: Option<bool>,
    #[serde(default)]
    pub es_convenio_multilateral: Option<bool>,
    #[serde(default)]
    pub provincias_cm05: Option<IntOrText>,
    #[serde(default)]
    pub permiso_venta_alcohol: Option<bool>,
    #[serde(default)]
    pub vencimiento_permiso_venta_alcohol: Option<String>,
    #[serde(default)]
    pub es_gran_empresa: Option<bool>,
    #[serde(default)]
    pub es_mipyme: Option<bool>,
    #[serde(default, rename = "Clifuerza")]
    pub clifuerza: Option<Vec<SalesForceAssignment>>,
}

/// Customer master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id_sucursal: i64,
    #[serde(default)]
    pub des_sucursal: Option<String>,
    pub id_cliente: i64,
    #[serde(default)]
    pub fecha_alta: Option<String>,
    #[serde(default)]
    pub anulado: Option<bool>,
    #[serde(default)]
    pub fecha_baja: Option<String>,

    // Commercial terms
    #[serde(default)]
    pub id_alias_vigente: Option<i64>,
    #[serde(default)]
    pub id_forma_pago: Option<i64>,
    #[serde(default)]
    pub des_forma_pago: Option<String>,
    #[serde(default)]
    pub plazo_pago: Option<i64>,
    #[serde(default)]
    pub id_lista_precio: Option<i64>,
    #[serde(default)]
    pub des_lista_precio: Option<String>,
    #[serde(default)]
    pub id_comprobante: Option<IntOrText>,
    #[serde(default)]
    pub des_comprobante: Option<String>,
    #[serde(default)]
    pub limite_importe: Option<f64>,
    #[serde(default)]
    pub id_art_limite: Option<i64>,
    #[serde(default)]
    pub des_art_limite: Option<String>,
    #[serde(default)]
    pub cant_art_limite: Option<i64>,
    #[serde(default)]
    pub cpbtes_impagos: Option<i64>,
    #[serde(default)]
    pub dias_deuda_vencida: Option<i64>,

    // Main address
    #[serde(default)]
    pub id_pais: Option<IntOrText>,
    #[serde(default)]
    pub id_provincia: Option<IntOrText>,
    #[serde(default)]
    pub des_provincia: Option<String>,
    #[serde(default)]
    pub id_departamento: Option<i64>,
    #[serde(default)]
    pub des_departamento: Option<String>,
    #[serde(default)]
    pub id_localidad: Option<i64>,
    #[serde(default)]
    pub des_localidad: Option<String>,
    #[serde(default)]
    pub calle: Option<String>,
    #[serde(default)]
    pub altura: Option<IntOrText>,
    #[serde(default)]
    pub entre_calle1: Option<IntOrText>,
    #[serde(default)]
    pub entre_calle2: Option<IntOrText>,
    #[serde(default)]
    pub comentario: Option<IntOrText>,
    #[serde(default)]
    pub longitud_geo: Option<IntOrText>,
    #[serde(default)]
    pub latitud_geo: Option<IntOrText>,
    #[serde(default)]
    pub horario: Option<IntOrText>,

    // Delivery address
    #[serde(default)]
    pub id_localidad_entrega: Option<i64>,
    #[serde(default)]
    pub des_localidad_entrega: Option<String>,
    #[serde(default)]
    pub calle_entrega: Option<String>,
    #[serde(default)]
    pub altura_entrega: Option<IntOrText>,
    #[serde(default)]
    pub piso_depto_entrega: Option<IntOrText>,
    #[serde(default)]
    pub entre_calle1_entrega: Option<IntOrText>,
    #[serde(default)]
    pub entre_calle2_entrega: Option<IntOrText>,
    #[serde(default)]
    pub comentario_entrega: Option<String>,
    #[serde(default)]
    pub longitud_geo_entrega: Option<IntOrText>,
    #[serde(default)]
    pub latitud_geo_entrega: Option<IntOrText>,
    #[serde(default)]
    pub horario_entrega: Option<IntOrText>,

    // Contact
    #[serde(default)]
    pub telefono_fijo: Option<IntOrText>,
    #[serde(default)]
    pub telefono_movil: Option<IntOrText>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub comentario_adicional: Option<String>,

    // Commissions
    #[serde(default)]
    pub id_comision_venta: Option<i64>,
    #[serde(default)]
    pub des_comision_venta: Option<String>,
    #[serde(default)]
    pub id_comision_flete: Option<i64>,
    #[serde(default)]
    pub des_comision_flete: Option<String>,
    #[serde(default)]
    pub porcentaje_flete: Option<f64>,

    // Marketing
    #[serde(default)]
    pub id_subcanal_mkt: Option<i64>,
    #[serde(default)]
    pub des_subcanal_mkt: Option<String>,
    #[serde(default)]
    pub id_canal_mkt: Option<i64>,
    #[serde(default)]
    pub des_canal_mkt: Option<String>,
    #[serde(default)]
    pub id_segmento_mkt: Option<i64>,
    #[serde(default)]
    pub des_segmento_mkt: Option<String>,
    #[serde(default)]
    pub id_ramo: Option<i64>,
    #[serde(default)]
    pub des_ramo: Option<String>,
    #[serde(default)]
    pub id_area: Option<i64>,
    #[serde(default)]
    pub des_area: Option<String>,
    #[serde(default)]
    pub id_agrupacion: Option<i64>,
    #[serde(default)]
    pub des_agrupacion: Option<String>,
    #[serde(default)]
    pub es_potencial: Option<bool>,
    #[serde(default, rename = "esCuentayOrden")]
    pub es_cuenta_y_orden: Option<bool>,
    #[serde(default)]
    pub id_ocasion_consumo: Option<i64>,
    #[serde(default)]
    pub des_ocasion_consumo: Option<String>,
    #[serde(default)]
    pub id_subcategoria_foco: Option<i64>,
    #[serde(default)]
    pub des_subcategoria_foco: Option<String>,
    #[serde(default)]
    pub foco_trade: Option<bool>,
    #[serde(default)]
    pub foco_ventas: Option<bool>,
    #[serde(default)]
    pub cluster_ventas: Option<IntOrText>,

    #[serde(default, rename = "cliente alias")]
    pub cliente_alias: Option<Vec<CustomerAlias>>,
}

impl Customer {
    /// Alias in force: the one matching `idAliasVigente`, else the first one
    pub fn current_alias(&self) -> Option<&CustomerAlias> {
        let aliases = self.cliente_alias.as_deref()?;
        self.id_alias_vigente
            .and_then(|id| aliases.iter().find(|a| a.id_alias == id))
            .or_else(|| aliases.first())
    }
}
