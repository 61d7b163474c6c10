use actix_web::{error::InternalError, web, HttpResponse};
use serde::Serialize;

use crate::{
    api::rpc::respond,
    models::{
        ActualizarUsuarioRequest, CrudResponse, RpcReply, RpcStatus, Usuario, UsuarioFields,
        UsuarioIdRequest, UsuariosList,
    },
    services::UsuarioService,
};

pub const SERVICE_PATH: &str = "/usuarios.UsuarioService";

/// Registra as cinco operações RPC sob `/usuarios.UsuarioService`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(SERVICE_PATH)
            .service(
                web::resource("/CrearUsuario")
                    .app_data(json_config::<CrudResponse>("CrearUsuario"))
                    .route(web::post().to(crear_usuario)),
            )
            .route("/LeerUsuarios", web::post().to(leer_usuarios))
            .service(
                web::resource("/LeerUsuarioPorId")
                    .app_data(json_config::<Usuario>("LeerUsuarioPorId"))
                    .route(web::post().to(leer_usuario_por_id)),
            )
            .service(
                web::resource("/ActualizarUsuario")
                    .app_data(json_config::<CrudResponse>("ActualizarUsuario"))
                    .route(web::post().to(actualizar_usuario)),
            )
            .service(
                web::resource("/EliminarUsuario")
                    .app_data(json_config::<CrudResponse>("EliminarUsuario"))
                    .route(web::post().to(eliminar_usuario)),
            ),
    );
}

/// Corpo que não decodifica vira INVALID_ARGUMENT com o payload zero da operação
fn json_config<T: Serialize + Default + 'static>(operation: &'static str) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, _req| {
        let reply = RpcReply::with_status(
            RpcStatus::InvalidArgument,
            format!("Invalid request body: {}", err),
            T::default(),
        );
        InternalError::from_response(err, respond(operation, reply)).into()
    })
}

/// POST /usuarios.UsuarioService/CrearUsuario
#[utoipa::path(
    post,
    path = "/usuarios.UsuarioService/CrearUsuario",
    tag = "Usuarios",
    request_body = UsuarioFields,
    responses(
        (status = 200, description = "Usuario created", body = CrudResponse),
        (status = 500, description = "Storage failure (success=false)", body = CrudResponse)
    )
)]
pub async fn crear_usuario(
    service: web::Data<UsuarioService>,
    request: web::Json<UsuarioFields>,
) -> HttpResponse {
    log::info!("📝 CrearUsuario - {}", request.email);
    respond("CrearUsuario", service.crear_usuario(request.into_inner()).await)
}

/// POST /usuarios.UsuarioService/LeerUsuarios - corpo vazio
#[utoipa::path(
    post,
    path = "/usuarios.UsuarioService/LeerUsuarios",
    tag = "Usuarios",
    responses(
        (status = 200, description = "Every stored usuario", body = UsuariosList),
        (status = 500, description = "Storage failure (empty list)", body = UsuariosList)
    )
)]
pub async fn leer_usuarios(service: web::Data<UsuarioService>) -> HttpResponse {
    log::info!("📋 LeerUsuarios");
    respond("LeerUsuarios", service.leer_usuarios().await)
}

/// POST /usuarios.UsuarioService/LeerUsuarioPorId
#[utoipa::path(
    post,
    path = "/usuarios.UsuarioService/LeerUsuarioPorId",
    tag = "Usuarios",
    request_body = UsuarioIdRequest,
    responses(
        (status = 200, description = "Usuario found", body = Usuario),
        (status = 400, description = "Malformed id or storage failure (empty usuario)", body = Usuario),
        (status = 404, description = "No usuario with this id (empty usuario)", body = Usuario)
    )
)]
pub async fn leer_usuario_por_id(
    service: web::Data<UsuarioService>,
    request: web::Json<UsuarioIdRequest>,
) -> HttpResponse {
    log::info!("🔎 LeerUsuarioPorId - {}", request.id);
    respond("LeerUsuarioPorId", service.leer_usuario_por_id(&request.id).await)
}

/// POST /usuarios.UsuarioService/ActualizarUsuario
#[utoipa::path(
    post,
    path = "/usuarios.UsuarioService/ActualizarUsuario",
    tag = "Usuarios",
    request_body = ActualizarUsuarioRequest,
    responses(
        (status = 200, description = "Update applied, or nothing to update (success=false)", body = CrudResponse),
        (status = 500, description = "Malformed id or storage failure (success=false)", body = CrudResponse)
    )
)]
pub async fn actualizar_usuario(
    service: web::Data<UsuarioService>,
    request: web::Json<ActualizarUsuarioRequest>,
) -> HttpResponse {
    log::info!("🔧 ActualizarUsuario - {}", request.id);
    respond("ActualizarUsuario", service.actualizar_usuario(request.into_inner()).await)
}

/// POST /usuarios.UsuarioService/EliminarUsuario
#[utoipa::path(
    post,
    path = "/usuarios.UsuarioService/EliminarUsuario",
    tag = "Usuarios",
    request_body = UsuarioIdRequest,
    responses(
        (status = 200, description = "Deleted, or not found (success=false)", body = CrudResponse),
        (status = 500, description = "Malformed id or storage failure (success=false)", body = CrudResponse)
    )
)]
pub async fn eliminar_usuario(
    service: web::Data<UsuarioService>,
    request: web::Json<UsuarioIdRequest>,
) -> HttpResponse {
    log::info!("🗑️  EliminarUsuario - {}", request.id);
    respond("EliminarUsuario", service.eliminar_usuario(&request.id).await)
}
