use crate::cache::{ObjectCache, create_object_cache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::models::staff::entities::{NewStaffUser, StaffRole};
use crate::notifier::{Notifier, create_notifier};
use crate::storage::Storage;
use crate::utils::generate_random_code;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub notifier: Arc<dyn Notifier>,
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    warn!("Attempting to create {} cache backend", cache_type);

    match create_object_cache().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            return Ok(cache);
        }
        Err(e) => warn!("Failed to create {} cache: {}", cache_type, e),
    }

    if cache_type != "moka" {
        warn!("Falling back to memory cache");
        if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
            match fallback_constructor().await {
                Ok(cache) => {
                    warn!("Successfully created fallback Moka (in-memory) cache backend");
                    return Ok(Arc::from(cache));
                }
                Err(fallback_e) => {
                    warn!("Failed to create fallback Moka cache: {}", fallback_e);
                }
            }
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何职员账号，则创建一个 admin 账号
pub async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_staff_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} staff account(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No staff accounts found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count staff accounts: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_code(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = NewStaffUser {
        username: "admin".to_string(),
        email: AppConfig::get().app.admin_email.clone(),
        password_hash,
        role: StaffRole::Admin,
    };

    match storage.create_staff_user(admin).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和通知后端
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    let notifier = create_notifier().expect("Failed to create notifier");
    warn!(
        "Notifier '{}' initialized",
        AppConfig::get().notifier.notifier_type
    );

    StartupContext {
        storage,
        cache,
        notifier,
    }
}
