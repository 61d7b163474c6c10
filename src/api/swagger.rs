use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Usuarios Service API",
        version = "1.0.0",
        description = "RPC interface for user records stored in MongoDB.\n\n**Calls:** every operation is `POST /usuarios.UsuarioService/<Operation>` with a JSON body.\n\n**Status:** the body is always a well-formed payload. The outcome category travels in the HTTP status and in the `grpc-status` header (0 OK, 3 INVALID_ARGUMENT, 5 NOT_FOUND, 13 INTERNAL); `grpc-message` carries percent-encoded details. Mutating operations also report `success`, which callers must check."
    ),
    paths(
        // Usuarios
        crate::api::usuarios::crear_usuario,
        crate::api::usuarios::leer_usuarios,
        crate::api::usuarios::leer_usuario_por_id,
        crate::api::usuarios::actualizar_usuario,
        crate::api::usuarios::eliminar_usuario,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::Usuario,
            crate::models::UsuarioFields,
            crate::models::ActualizarUsuarioRequest,
            crate::models::UsuarioIdRequest,
            crate::models::CrudResponse,
            crate::models::UsuariosList,
            crate::models::Timestamp,

            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Usuarios", description = "Create, list, read, partially update and delete usuarios."),
        (name = "Health", description = "Health check and RPC counters."),
    )
)]
pub struct ApiDoc;
