use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Timestamp portátil (mesmo layout do `google.protobuf.Timestamp`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    pub fn from_bson(dt: bson::DateTime) -> Self {
        let millis = dt.timestamp_millis();
        Timestamp {
            seconds: millis.div_euclid(1000),
            nanos: (millis.rem_euclid(1000) * 1_000_000) as i32,
        }
    }
}

/// Usuário no formato do wire (resposta de LeerUsuarios / LeerUsuarioPorId)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Usuario {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub preferred_styles: Vec<String>,
    pub garment_refs: Vec<String>,
    pub registered_at: Timestamp,
    pub follower_refs: Vec<String>,
    pub following_refs: Vec<String>,
}

/// Campos editáveis de um usuário, como chegam no request.
/// Campos ausentes no JSON ficam com o valor zero (string vazia / lista vazia).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UsuarioFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub preferred_styles: Vec<String>,
    pub garment_refs: Vec<String>,
    pub follower_refs: Vec<String>,
    pub following_refs: Vec<String>,
}

/// Request de ActualizarUsuario: id + qualquer subconjunto dos campos
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ActualizarUsuarioRequest {
    pub id: String,
    #[serde(flatten)]
    pub fields: UsuarioFields,
}

/// Request de LeerUsuarioPorId / EliminarUsuario
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UsuarioIdRequest {
    pub id: String,
}

/// Resposta das operações de escrita
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrudResponse {
    pub success: bool,
    pub message: String,
    pub inserted_id: String,
}

impl CrudResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        CrudResponse { success: true, message: message.into(), inserted_id: String::new() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        CrudResponse { success: false, message: message.into(), inserted_id: String::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UsuariosList {
    pub users: Vec<Usuario>,
}

/// Documento de usuário (armazenado no MongoDB, coleção `usuarios`)
/// Os nomes dos campos persistidos são os da base já existente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsuarioDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub nombre: String,
    pub email: String,
    pub password: String,
    pub genero: String,
    pub estilos_preferidos: Vec<String>,

    /// Referências para peças do armário
    pub prendas_armario: Vec<ObjectId>,

    /// Atribuída pelo serviço na criação, nunca alterada depois
    pub fecha_registro: bson::DateTime,

    pub seguidores: Vec<ObjectId>,
    pub siguiendo: Vec<ObjectId>,
}
