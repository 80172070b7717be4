use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vehicle_maintenance::config::{DatabaseConfig, EnvironmentConfig};
use vehicle_maintenance::database::DatabaseConnection;
use vehicle_maintenance::models::catalog::VehicleCatalog;
use vehicle_maintenance::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vehicle_maintenance=debug,tower_http=info")),
        )
        .init();

    info!("🔧 Vehicle Maintenance Tracker");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️  Entorno: {}", config.environment);
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío en producción: se acepta cualquier origen");
    }

    let catalog = match VehicleCatalog::load(config.catalog_path.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("❌ Error cargando el catálogo de vehículos: {}", e);
            return Err(anyhow::anyhow!("Error de catálogo: {}", e));
        }
    };
    info!("📚 Catálogo cargado con {} vehículos", catalog.vehicles().len());

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&DatabaseConfig::new(&config.database_url)).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr = config.server_url();
    let app_state = AppState::new(db_connection.pool().clone(), config, catalog);
    let app = create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/signup - Registrar usuario");
    info!("   POST /api/auth/login - Login por email o móvil");
    info!("   POST /api/auth/logout - Cerrar sesión");
    info!("   GET  /api/auth/reset/challenge - Pregunta de verificación");
    info!("   POST /api/auth/reset - Restablecer contraseña");
    info!("👤 Perfil:");
    info!("   GET  /api/profile - Obtener perfil");
    info!("   PUT  /api/profile - Actualizar perfil");
    info!("🚗 Mantenimiento:");
    info!("   GET  /api/catalog - Catálogo de vehículos");
    info!("   GET  /api/maintenance - Vehículos y registros del usuario");
    info!("   PUT  /api/maintenance/odometers - Actualizar odómetros");
    info!("   POST /api/maintenance/service - Marcar tarea como realizada");
    info!("   GET  /api/maintenance/:vehicle/status - Estado de mantenimiento");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("⚠️ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
