// ==========================================
// 导入 API 端到端测试
// ==========================================
// 模拟管理后台调用: 配置 → 上传 → 汇总文案 / 错误文案 → 模板下载
// ==========================================


use std::sync::Mutex;
use storefront_import::api::{ApiError, ImportApi};
use storefront_import::config::{config_keys, ConfigManager};
use storefront_import::domain::DomainType;
use storefront_import::i18n::set_locale;
use test_helpers::*;

// locale 为全局状态，本文件内的测试串行执行
static LOCALE_LOCK: Mutex<()> = Mutex::new(());

/// 关闭翻译，避免测试访问外部服务
fn disable_translation(db_path: &str) {
    let config = ConfigManager::new(db_path).unwrap();
    config
        .set_global_config_value(config_keys::TRANSLATION_ENABLED, "false")
        .unwrap();
}

#[tokio::test]
async fn test_import_api_full_flow() {
    let _guard = LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    set_locale("en");

    let (_tmp, db_path) = create_test_db().unwrap();
    disable_translation(&db_path);
    let api = ImportApi::new(db_path.clone());

    let csv = csv_text(
        GAME_HEADER,
        &[
            "a.jpg,Hades,15 GB,2020,PC Game,24.99,USD,Escape the underworld,updated,Rogelike",
            "b.jpg,Halo,50 GB,2001,Xbox,9.99,USD,Finish the fight,,",
        ],
    );
    let response = api.import_catalog_bytes(csv.as_bytes(), "game").await.unwrap();

    assert_eq!(response.domain, DomainType::Game);
    assert_eq!(response.attempted, 2);
    assert_eq!(response.succeeded, 1);
    assert_eq!(response.skipped_translation, 1);
    assert_eq!(response.message, "Imported 1 of 2 rows (1 rejected)");

    let rejection = &response.rejections[0];
    assert_eq!(rejection.row_number, 2);
    assert!(rejection.message.starts_with("Invalid platform: \"Xbox\""));
    assert!(rejection.message.contains("Xbox Series"));

    let games = load_games(&db_path);
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].description, "Escape the underworld");
    assert_eq!(games[0].status.as_deref(), Some("updated"));
}

#[tokio::test]
async fn test_import_api_messages_follow_locale() {
    let _guard = LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    set_locale("es");

    let (_tmp, db_path) = create_test_db().unwrap();
    disable_translation(&db_path);
    let api = ImportApi::new(db_path);

    let csv = csv_text(
        "name,price,currency,description,image,category",
        &["Mouse,10,EUR,Gaming mouse,m.jpg,accessory"],
    );
    let response = api
        .import_catalog_bytes(csv.as_bytes(), "products")
        .await
        .unwrap();
    assert_eq!(
        response.rejections[0].message,
        "Valor inválido para Moneda: \"EUR\". Valores válidos: USD, CUP"
    );

    let err = api
        .import_catalog_bytes(b"name,price\nMouse,10\n", "product")
        .await
        .unwrap_err();
    match err {
        ApiError::ValidationError(message) => {
            assert!(message.starts_with("Faltan campos requeridos: currency, description, image, category."));
            assert!(message.ends_with("Campos opcionales: ninguno"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    set_locale("en");
}

#[tokio::test]
async fn test_import_api_file_errors() {
    let _guard = LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    set_locale("en");

    let (_tmp, db_path) = create_test_db().unwrap();
    let api = ImportApi::new(db_path);

    let err = api
        .import_catalog("/nonexistent/services.csv", "service")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref m) if m == "File not found: /nonexistent/services.csv"));

    let err = api
        .import_catalog_bytes(GAME_HEADER.as_bytes(), "game")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(ref m) if m.starts_with("No valid data found")));

    let err = api
        .import_catalog_bytes(b"", "banner")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_downloaded_template_imports_cleanly() {
    let (_tmp, db_path) = create_test_db().unwrap();
    disable_translation(&db_path);
    let api = ImportApi::new(db_path.clone());

    for domain in DomainType::ALL {
        let template = api.generate_template(domain.as_str()).unwrap();
        assert_eq!(
            template.file_name,
            format!("{}_import_template.csv", domain.as_str())
        );

        let response = api
            .import_catalog_bytes(template.content.as_bytes(), domain.as_str())
            .await
            .unwrap();
        assert_eq!(response.succeeded, 1);
        assert_eq!(response.rejected, 0);
        assert_eq!(count_rows(&db_path, domain), 1);
    }
}
