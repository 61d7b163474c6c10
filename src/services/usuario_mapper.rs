// ==================== USUARIO MAPPER ====================
// Conversão entre o usuário do wire (strings) e o documento do MongoDB
// (ObjectId, DateTime). Toda a lógica de decisão do serviço mora aqui.

use crate::{
    models::{Timestamp, Usuario, UsuarioDocument, UsuarioFields},
    utils::error::AppError,
};
use mongodb::bson::{self, oid::ObjectId, Bson, Document};

/// Converte um id vindo do cliente em ObjectId (falha se a sintaxe for inválida)
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|e| AppError::InvalidObjectId(format!("'{}': {}", id, e)))
}

/// Converte uma lista de ids em ObjectIds. Ids inválidos são descartados
/// silenciosamente; a ordem relativa dos válidos é mantida.
pub fn coerce_refs(ids: &[String]) -> Vec<ObjectId> {
    ids.iter()
        .filter_map(|id| ObjectId::parse_str(id).ok())
        .collect()
}

/// Monta o documento completo para inserção. `registered_at` é sempre do
/// relógio do serviço, nunca do request.
pub fn to_stored(fields: &UsuarioFields, registered_at: bson::DateTime) -> UsuarioDocument {
    UsuarioDocument {
        id: None,
        nombre: fields.name.clone(),
        email: fields.email.clone(),
        password: fields.password.clone(),
        genero: fields.gender.clone(),
        estilos_preferidos: fields.preferred_styles.clone(),
        prendas_armario: coerce_refs(&fields.garment_refs),
        fecha_registro: registered_at,
        seguidores: coerce_refs(&fields.follower_refs),
        siguiendo: coerce_refs(&fields.following_refs),
    }
}

/// Converte um documento bruto do MongoDB no usuário do wire.
/// Campos ausentes ou com tipo inesperado viram o valor zero, nunca erro.
pub fn to_wire(doc: &Document) -> Usuario {
    let fecha_registro = match doc.get("fecha_registro") {
        Some(Bson::DateTime(dt)) => Timestamp::from_bson(*dt),
        _ => Timestamp::default(),
    };

    Usuario {
        id: doc.get_object_id("_id").map(|oid| oid.to_hex()).unwrap_or_default(),
        name: string_field(doc, "nombre"),
        email: string_field(doc, "email"),
        password: string_field(doc, "password"),
        gender: string_field(doc, "genero"),
        preferred_styles: string_list(doc, "estilos_preferidos"),
        garment_refs: ref_list(doc, "prendas_armario"),
        registered_at: fecha_registro,
        follower_refs: ref_list(doc, "seguidores"),
        following_refs: ref_list(doc, "siguiendo"),
    }
}

/// Monta o corpo do `$set` com apenas os campos "truthy" do request
/// (string não vazia / lista não vazia). Vazio = nada para atualizar.
pub fn build_update_set(fields: &UsuarioFields) -> Document {
    let mut set = Document::new();

    if !fields.name.is_empty() { set.insert("nombre", &fields.name); }
    if !fields.email.is_empty() { set.insert("email", &fields.email); }
    if !fields.password.is_empty() { set.insert("password", &fields.password); }
    if !fields.gender.is_empty() { set.insert("genero", &fields.gender); }
    if !fields.preferred_styles.is_empty() { set.insert("estilos_preferidos", fields.preferred_styles.clone()); }
    if !fields.garment_refs.is_empty() { set.insert("prendas_armario", coerce_refs(&fields.garment_refs)); }
    if !fields.follower_refs.is_empty() { set.insert("seguidores", coerce_refs(&fields.follower_refs)); }
    if !fields.following_refs.is_empty() { set.insert("siguiendo", coerce_refs(&fields.following_refs)); }

    set
}

fn string_field(doc: &Document, key: &str) -> String {
    doc.get_str(key).map(str::to_string).unwrap_or_default()
}

fn string_list(doc: &Document, key: &str) -> Vec<String> {
    match doc.get_array(key) {
        Ok(items) => items
            .iter()
            .filter_map(|b| b.as_str().map(str::to_string))
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn ref_list(doc: &Document, key: &str) -> Vec<String> {
    match doc.get_array(key) {
        Ok(items) => items
            .iter()
            .filter_map(|b| match b {
                Bson::ObjectId(oid) => Some(oid.to_hex()),
                Bson::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    const ID_A: &str = "65a1b2c3d4e5f6a7b8c9d0e1";
    const ID_B: &str = "65a1b2c3d4e5f6a7b8c9d0e2";

    fn sample_fields() -> UsuarioFields {
        UsuarioFields {
            name: "Ana".into(),
            email: "a@x.com".into(),
            password: "secret".into(),
            gender: "F".into(),
            preferred_styles: vec!["casual".into(), "boho".into()],
            garment_refs: vec![ID_A.into()],
            follower_refs: vec![ID_B.into(), ID_A.into()],
            following_refs: vec![],
        }
    }

    #[test]
    fn test_parse_object_id() {
        assert_eq!(parse_object_id(ID_A).unwrap().to_hex(), ID_A);
        assert!(matches!(parse_object_id("not-a-valid-id"), Err(AppError::InvalidObjectId(_))));
        assert!(parse_object_id("").is_err());
    }

    #[test]
    fn test_coerce_refs_drops_invalid_keeps_order() {
        let ids = vec![
            ID_B.to_string(),
            "nope".to_string(),
            ID_A.to_string(),
            "65a1b2c3d4e5f6a7b8c9d0e".to_string(), // 23 chars
        ];

        let coerced: Vec<String> = coerce_refs(&ids).iter().map(|o| o.to_hex()).collect();
        assert_eq!(coerced, vec![ID_B.to_string(), ID_A.to_string()]);
    }

    #[test]
    fn test_to_stored_injects_registration_date() {
        let now = bson::DateTime::from_millis(1_700_000_000_000);
        let mut fields = sample_fields();
        fields.garment_refs.push("bad-id".into());

        let stored = to_stored(&fields, now);

        assert!(stored.id.is_none());
        assert_eq!(stored.nombre, "Ana");
        assert_eq!(stored.fecha_registro, now);
        assert_eq!(stored.prendas_armario.len(), 1);
        assert_eq!(stored.seguidores.len(), 2);
        assert!(stored.siguiendo.is_empty());
    }

    #[test]
    fn test_round_trip_through_stored_document() {
        let now = bson::DateTime::from_millis(1_700_000_000_250);
        let fields = sample_fields();
        let mut stored = to_stored(&fields, now);
        stored.id = Some(ObjectId::parse_str(ID_B).unwrap());

        let doc = bson::to_document(&stored).unwrap();
        let wire = to_wire(&doc);

        assert_eq!(wire.id, ID_B);
        assert_eq!(wire.name, fields.name);
        assert_eq!(wire.email, fields.email);
        assert_eq!(wire.password, fields.password);
        assert_eq!(wire.gender, fields.gender);
        assert_eq!(wire.preferred_styles, fields.preferred_styles);
        assert_eq!(wire.garment_refs, fields.garment_refs);
        assert_eq!(wire.follower_refs, fields.follower_refs);
        assert!(wire.following_refs.is_empty());
        assert_eq!(wire.registered_at, Timestamp { seconds: 1_700_000_000, nanos: 250_000_000 });
    }

    #[test]
    fn test_to_wire_missing_fields_become_zero_values() {
        let wire = to_wire(&Document::new());
        assert_eq!(wire, Usuario::default());
    }

    #[test]
    fn test_to_wire_tolerates_unexpected_types() {
        let doc = doc! {
            "_id": "not-an-object-id",
            "nombre": 42,
            "estilos_preferidos": ["street", 7, "minimal"],
            "prendas_armario": [ObjectId::parse_str(ID_A).unwrap(), "legacy-ref", 3.5],
            "fecha_registro": "2024-01-01T00:00:00Z",
            "seguidores": "not-a-list",
        };

        let wire = to_wire(&doc);

        assert_eq!(wire.id, "");
        assert_eq!(wire.name, "");
        assert_eq!(wire.preferred_styles, vec!["street".to_string(), "minimal".to_string()]);
        assert_eq!(wire.garment_refs, vec![ID_A.to_string(), "legacy-ref".to_string()]);
        assert_eq!(wire.registered_at, Timestamp::default());
        assert!(wire.follower_refs.is_empty());
    }

    #[test]
    fn test_update_set_empty_when_nothing_truthy() {
        assert!(build_update_set(&UsuarioFields::default()).is_empty());
    }

    #[test]
    fn test_update_set_only_truthy_fields() {
        let fields = UsuarioFields {
            email: "new@x.com".into(),
            name: String::new(),
            ..Default::default()
        };

        let set = build_update_set(&fields);

        assert_eq!(set, doc! { "email": "new@x.com" });
    }

    #[test]
    fn test_update_set_coerces_reference_lists() {
        let fields = UsuarioFields {
            following_refs: vec!["bad".into(), ID_A.into()],
            garment_refs: vec!["also-bad".into()],
            ..Default::default()
        };

        let set = build_update_set(&fields);

        assert_eq!(set.get_array("siguiendo").unwrap(), &vec![Bson::ObjectId(ObjectId::parse_str(ID_A).unwrap())]);
        // lista "truthy" só com ids inválidos zera a lista armazenada
        assert!(set.get_array("prendas_armario").unwrap().is_empty());
        assert!(!set.contains_key("fecha_registro"));
    }
}
