// ==================== USUARIO SERVICE ====================
// As cinco operações RPC sobre a coleção de usuários.
// Toda falha vira um RpcReply com status + payload bem formado; nada escapa.

use crate::{
    database::UsuarioStore,
    models::{
        ActualizarUsuarioRequest, CrudResponse, RpcReply, RpcStatus, Usuario,
        UsuarioFields, UsuariosList,
    },
    services::usuario_mapper::{build_update_set, parse_object_id, to_stored, to_wire},
    utils::error::AppError,
};
use mongodb::bson::DateTime;
use std::sync::Arc;

pub const MSG_CREATED: &str = "Usuario creado exitosamente";
pub const MSG_UPDATED: &str = "Usuario actualizado";
pub const MSG_NOT_MODIFIED: &str = "No se modificó el usuario o no se encontró";
pub const MSG_NOTHING_TO_UPDATE: &str = "No hay campos para actualizar";
pub const MSG_DELETED: &str = "Usuario eliminado";
pub const MSG_DELETE_NOT_FOUND: &str = "No se encontró el usuario";

#[derive(Clone)]
pub struct UsuarioService {
    store: Arc<dyn UsuarioStore>,
}

impl UsuarioService {
    pub fn new(store: Arc<dyn UsuarioStore>) -> Self {
        Self { store }
    }

    /// CrearUsuario
    pub async fn crear_usuario(&self, fields: UsuarioFields) -> RpcReply<CrudResponse> {
        let documento = to_stored(&fields, DateTime::now());

        match self.store.insert_one(documento).await {
            Ok(id) => {
                log::info!("✅ Usuario created: {}", id);
                RpcReply::ok(CrudResponse {
                    success: true,
                    message: MSG_CREATED.to_string(),
                    inserted_id: id.to_hex(),
                })
            }
            Err(e) => {
                log::error!("❌ Error creating usuario: {}", e);
                internal("Error al crear usuario", &e, CrudResponse::failed(e.to_string()))
            }
        }
    }

    /// LeerUsuarios
    pub async fn leer_usuarios(&self) -> RpcReply<UsuariosList> {
        match self.store.find_all().await {
            Ok(docs) => {
                let users: Vec<Usuario> = docs.iter().map(to_wire).collect();
                log::info!("📋 Listed {} usuarios", users.len());
                RpcReply::ok(UsuariosList { users })
            }
            Err(e) => {
                log::error!("❌ Error listing usuarios: {}", e);
                internal("Error al leer usuarios", &e, UsuariosList::default())
            }
        }
    }

    /// LeerUsuarioPorId
    ///
    /// Id malformado e erro do banco respondem INVALID_ARGUMENT;
    /// só um id válido e ausente responde NOT_FOUND.
    pub async fn leer_usuario_por_id(&self, id: &str) -> RpcReply<Usuario> {
        let lookup = match parse_object_id(id) {
            Ok(object_id) => self.store.find_one(object_id).await,
            Err(e) => Err(e),
        };

        match lookup {
            Ok(Some(doc)) => RpcReply::ok(to_wire(&doc)),
            Ok(None) => {
                log::warn!("⚠️ Usuario {} not found", id);
                RpcReply::with_status(
                    RpcStatus::NotFound,
                    format!("Usuario con ID {} no encontrado", id),
                    Usuario::default(),
                )
            }
            Err(e) => {
                log::warn!("⚠️ Failed to read usuario {}: {}", id, e);
                RpcReply::with_status(
                    RpcStatus::InvalidArgument,
                    format!("Error al leer usuario: ID inválido o error interno. {}", e),
                    Usuario::default(),
                )
            }
        }
    }

    /// ActualizarUsuario
    pub async fn actualizar_usuario(&self, request: ActualizarUsuarioRequest) -> RpcReply<CrudResponse> {
        let object_id = match parse_object_id(&request.id) {
            Ok(oid) => oid,
            Err(e) => return internal("Error al actualizar usuario", &e, CrudResponse::failed(e.to_string())),
        };

        let update_set = build_update_set(&request.fields);
        if update_set.is_empty() {
            log::info!("ℹ️  Nothing to update for usuario {}", object_id);
            return RpcReply::ok(CrudResponse::failed(MSG_NOTHING_TO_UPDATE));
        }

        match self.store.update_one(object_id, update_set).await {
            Ok(outcome) if outcome.modified_count > 0 => {
                log::info!("✅ Usuario {} updated", object_id);
                RpcReply::ok(CrudResponse::ok(MSG_UPDATED))
            }
            Ok(outcome) => {
                log::info!(
                    "ℹ️  Usuario {} not modified (matched: {})",
                    object_id, outcome.matched_count
                );
                RpcReply::ok(CrudResponse::ok(MSG_NOT_MODIFIED))
            }
            Err(e) => {
                log::error!("❌ Error updating usuario {}: {}", object_id, e);
                internal("Error al actualizar usuario", &e, CrudResponse::failed(e.to_string()))
            }
        }
    }

    /// EliminarUsuario
    pub async fn eliminar_usuario(&self, id: &str) -> RpcReply<CrudResponse> {
        let object_id = match parse_object_id(id) {
            Ok(oid) => oid,
            Err(e) => return internal("Error al eliminar usuario", &e, CrudResponse::failed(e.to_string())),
        };

        match self.store.delete_one(object_id).await {
            Ok(deleted) if deleted > 0 => {
                log::info!("🗑️  Usuario {} deleted", object_id);
                RpcReply::ok(CrudResponse::ok(MSG_DELETED))
            }
            Ok(_) => RpcReply::ok(CrudResponse::failed(MSG_DELETE_NOT_FOUND)),
            Err(e) => {
                log::error!("❌ Error deleting usuario {}: {}", object_id, e);
                internal("Error al eliminar usuario", &e, CrudResponse::failed(e.to_string()))
            }
        }
    }

    pub async fn database_reachable(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("⚠️ Database ping failed: {}", e);
                false
            }
        }
    }
}

fn internal<T>(context: &str, error: &AppError, payload: T) -> RpcReply<T> {
    RpcReply::with_status(RpcStatus::Internal, format!("{}: {}", context, error), payload)
}
