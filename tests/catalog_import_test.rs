// ==========================================
// 目录导入流程集成测试
// ==========================================
// 覆盖: 默认值填充、类型门控、行级拒绝、翻译降级与退避、
//       表头先行校验、写入失败、空文件
// ==========================================


use chrono::{Datelike, Local};
use std::sync::atomic::Ordering;
use std::time::Duration;
use storefront_import::domain::{DomainType, RejectionReason};
use storefront_import::importer::{CatalogImporter, ImportError};
use storefront_import::translation::ProviderError;
use test_helpers::*;

const HOLLOW_KNIGHT: &str = "https://cdn.example.com/hk.jpg,Hollow Knight,9 GB,2017,PC Game,14.99,USD,Explore the ruined kingdom of Hallownest,newly_added,Metroidvania";

#[tokio::test]
async fn test_e2e_single_game_row_translated_and_stored() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let provider = MockProvider::translating("mock");
    let importer = build_importer(&db_path, MockConfig::fast(), provider_chain(&[&provider]));

    let csv = csv_text(GAME_HEADER, &[HOLLOW_KNIGHT]);
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();

    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.rejected, 0);
    assert_eq!(summary.translated, 1);
    assert!(!summary.batch_id.is_empty());

    let games = load_games(&db_path);
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert_eq!(game.name, "Hollow Knight");
    assert_eq!(game.year, 2017);
    assert!((game.price - 14.99).abs() < f64::EPSILON);
    assert_eq!(game.currency, "USD");
    assert_eq!(
        game.description,
        "[es] Explore the ruined kingdom of Hallownest"
    );
    assert_eq!(game.status.as_deref(), Some("newly_added"));
    assert_eq!(game.genre.as_deref(), Some("Metroidvania"));
    assert_eq!(game.views, 0);
}

#[tokio::test]
async fn test_missing_year_and_bad_price_are_defaulted() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let importer = build_importer(&db_path, MockConfig::translation_disabled(), Vec::new());

    let csv = csv_text(
        GAME_HEADER,
        &[
            "c.jpg,Celeste,1 GB,,Nintendo Switch,abc,CUP,Climb the mountain,,",
            "d.jpg,Tetris,1 MB,0,Nintendo Switch,1,USD,Stack the blocks,,",
            "e.jpg,Pong,1 MB,-5,Nintendo Switch,1,USD,Hit the ball,,",
        ],
    );
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();
    assert_eq!(summary.succeeded, 3);

    let games = load_games(&db_path);
    let game = &games[0];
    assert_eq!(game.year, Local::now().year());
    assert_eq!(game.price, 0.0);
    assert_eq!(game.currency, "CUP");
    assert_eq!(game.status, None);
    assert_eq!(game.views, 0);

    // 0 与负数年份回落为当前年份
    assert_eq!(games[1].year, Local::now().year());
    assert_eq!(games[2].year, Local::now().year());
}

#[tokio::test]
async fn test_genre_only_kept_for_pc_games() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let importer = build_importer(&db_path, MockConfig::translation_disabled(), Vec::new());

    let csv = csv_text(
        GAME_HEADER,
        &[
            "a.jpg,Doom,40 GB,2016,PC Game,19.99,USD,Rip and tear,,Shooter",
            "b.jpg,Bloodborne,50 GB,2015,PlayStation 4,19.99,USD,Hunt the beasts,,Action RPG",
        ],
    );
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();
    assert_eq!(summary.succeeded, 2);

    let games = load_games(&db_path);
    assert_eq!(games[0].genre.as_deref(), Some("Shooter"));
    assert_eq!(games[1].genre, None);
}

#[tokio::test]
async fn test_invalid_currency_rejects_only_that_row() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let importer = build_importer(&db_path, MockConfig::translation_disabled(), Vec::new());

    let csv = csv_text(
        GAME_HEADER,
        &[
            "a.jpg,First,1 GB,2020,PC Game,1,USD,First game,,",
            "b.jpg,Second,1 GB,2020,PC Game,1,EUR,Second game,,",
            "c.jpg,Third,1 GB,2020,PC Game,1,CUP,Third game,,",
        ],
    );
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();

    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.rejections[0].row_number, 2);
    match &summary.rejections[0].reason {
        RejectionReason::InvalidEnumValue { field, value, .. } => {
            assert_eq!(field, "currency");
            assert_eq!(value, "EUR");
        }
        other => panic!("unexpected reason: {:?}", other),
    }

    let names: Vec<String> = load_games(&db_path).into_iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["First", "Third"]);
}

#[tokio::test]
async fn test_blank_rows_keep_source_numbering() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let importer = build_importer(&db_path, MockConfig::translation_disabled(), Vec::new());

    let csv = csv_text(
        GAME_HEADER,
        &[
            "a.jpg,First,1 GB,2020,PC Game,1,USD,First game,,",
            "   ,  ,  ,  ,  ,  ,  ,  ,  ,  ",
            "c.jpg,Third,1 GB,2020,Sega Saturn,1,USD,Third game,,",
        ],
    );
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.rejections.len(), 1);
    assert_eq!(summary.rejections[0].row_number, 3);
}

#[tokio::test]
async fn test_translation_failure_keeps_original_description() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let first = MockProvider::failing("first");
    let second = MockProvider::new(
        "second",
        vec![Err(ProviderError::RateLimited), Err(ProviderError::Timeout)],
        Fallback::Fail,
    );
    let importer = build_importer(
        &db_path,
        MockConfig::fast(),
        provider_chain(&[&first, &second]),
    );

    let csv = csv_text(
        GAME_HEADER,
        &[
            "a.jpg,First,1 GB,2020,PC Game,1,USD,Fight the dragon,,",
            "b.jpg,Second,1 GB,2020,PC Game,1,USD,Save the princess,,",
        ],
    );
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.untranslated, 2);
    assert_eq!(summary.translated, 0);
    // 每条描述都依次尝试了两个服务
    assert_eq!(first.call_count(), 2);
    assert_eq!(second.call_count(), 2);

    let descriptions: Vec<String> = load_games(&db_path)
        .into_iter()
        .map(|g| g.description)
        .collect();
    assert_eq!(descriptions, vec!["Fight the dragon", "Save the princess"]);
}

#[tokio::test]
async fn test_failover_uses_next_provider() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let first = MockProvider::failing("first");
    let second = MockProvider::translating("second");
    let importer = build_importer(
        &db_path,
        MockConfig::fast(),
        provider_chain(&[&first, &second]),
    );

    let csv = csv_text(GAME_HEADER, &[HOLLOW_KNIGHT]);
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();

    assert_eq!(summary.translated, 1);
    assert_eq!(first.call_count(), 1);
    assert_eq!(second.call_count(), 1);
    assert!(load_games(&db_path)[0].description.starts_with("[es] "));
}

#[tokio::test]
async fn test_backoff_grows_after_failures_and_resets() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let provider = MockProvider::new(
        "mock",
        vec![
            Err(ProviderError::Status(500)),
            Err(ProviderError::Status(500)),
            Ok("tercero".to_string()),
            Ok("cuarto".to_string()),
        ],
        Fallback::Fail,
    );
    // base = 20ms, max = 60ms
    let importer = build_importer(
        &db_path,
        MockConfig::with_delays(20, 60),
        provider_chain(&[&provider]),
    );

    let csv = csv_text(
        GAME_HEADER,
        &[
            "a.jpg,A,1 GB,2020,PC Game,1,USD,Open the first door,,",
            "b.jpg,B,1 GB,2020,PC Game,1,USD,Open the second door,,",
            "c.jpg,C,1 GB,2020,PC Game,1,USD,Open the third door,,",
            "d.jpg,D,1 GB,2020,PC Game,1,USD,Open the fourth door,,",
        ],
    );
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();
    assert_eq!(summary.untranslated, 2);
    assert_eq!(summary.translated, 2);

    let times = provider.call_times();
    assert_eq!(times.len(), 4);
    // 一次失败后: base·2
    assert!(times[1] - times[0] >= Duration::from_millis(40));
    // 两次失败后: min(base·4, max)
    assert!(times[2] - times[1] >= Duration::from_millis(60));
    // 成功后恢复为 base
    assert!(times[3] - times[2] >= Duration::from_millis(20));
}

#[tokio::test]
async fn test_text_already_in_target_language_is_not_sent() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let provider = MockProvider::translating("mock");
    let importer = build_importer(&db_path, MockConfig::fast(), provider_chain(&[&provider]));

    let csv = csv_text(
        GAME_HEADER,
        &[
            "a.jpg,A,1 GB,2020,PC Game,1,USD,Un juego de acción para toda la familia,,",
            "b.jpg,B,1 GB,2016,Nintendo 3DS,1,USD,Catch Pokémon in a new region,,",
            "c.jpg,C,1 GB,2016,Nintendo 3DS,1,USD,Pokémon Sun and Pokémon Moon,,",
            "d.jpg,D,1 GB,2020,PC Game,1,USD,Día de los Muertos themed shooter for the whole family,,",
        ],
    );
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();

    // 只有真正的西语描述被跳过；带重音专有名词的英语描述照常翻译
    assert_eq!(summary.skipped_translation, 1);
    assert_eq!(summary.translated, 3);
    assert_eq!(
        provider.seen_texts(),
        vec![
            "Catch Pokémon in a new region",
            "Pokémon Sun and Pokémon Moon",
            "Día de los Muertos themed shooter for the whole family",
        ]
    );

    let descriptions: Vec<String> = load_games(&db_path)
        .into_iter()
        .map(|g| g.description)
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Un juego de acción para toda la familia",
            "[es] Catch Pokémon in a new region",
            "[es] Pokémon Sun and Pokémon Moon",
            "[es] Día de los Muertos themed shooter for the whole family",
        ]
    );
}

#[tokio::test]
async fn test_missing_header_fails_before_any_row_work() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let provider = MockProvider::translating("mock");
    let importer = build_importer(&db_path, MockConfig::fast(), provider_chain(&[&provider]));

    // 缺少 platform 列
    let csv = csv_text(
        "cover,name,size,year,price,currency,description",
        &["a.jpg,A,1 GB,2020,1,USD,Open the door"],
    );
    let err = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap_err();

    match err {
        ImportError::MissingFields { missing, optional } => {
            assert_eq!(missing, vec!["platform".to_string()]);
            assert_eq!(optional, vec!["status".to_string(), "genre".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(provider.call_count(), 0);
    assert_eq!(count_rows(&db_path, DomainType::Game), 0);

    // 缺少 currency 列
    let csv = csv_text(
        "cover,name,size,year,platform,price,description",
        &["a.jpg,A,1 GB,2020,PC Game,1,Open the door"],
    );
    let err = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::MissingFields { ref missing, .. } if missing == &vec!["currency".to_string()]
    ));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_store_failure_fails_whole_import() {
    let repo = FailingRepository::default();
    let importer = build_importer_with_repo(repo, MockConfig::translation_disabled(), Vec::new());

    let csv = csv_text(GAME_HEADER, &[HOLLOW_KNIGHT]);
    let err = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::StoreWriteError(_)));
    assert_eq!(importer.repository().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_all_rows_rejected_skips_store() {
    let repo = FailingRepository::default();
    let importer = build_importer_with_repo(repo, MockConfig::translation_disabled(), Vec::new());

    let csv = csv_text(
        GAME_HEADER,
        &["a.jpg,A,1 GB,2020,PC Game,1,EUR,Open the door,,"],
    );
    let summary = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.rejected, 1);
    assert_eq!(importer.repository().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_header_only_file_has_no_data_rows() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let importer = build_importer(&db_path, MockConfig::translation_disabled(), Vec::new());

    let csv = csv_text(GAME_HEADER, &["  ,  ,  "]);
    let err = importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::NoDataRows));
}

#[tokio::test]
async fn test_product_and_service_imports() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let importer = build_importer(&db_path, MockConfig::translation_disabled(), Vec::new());

    let products = csv_text(
        "name,price,currency,description,image,category",
        &[
            "Headset,59.90,USD,Wireless headset,h.jpg,accessory",
            "Console,399,USD,Next gen console,c.jpg,Electronics",
        ],
    );
    let summary = importer
        .import_from_bytes(products.as_bytes(), DomainType::Product)
        .await
        .unwrap();
    // 枚举匹配区分大小写
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.rejections[0].row_number, 2);

    let services = csv_text(
        "cover,name,price,currency,description,duration",
        &["s.jpg,Console repair,25,CUP,Fix the console,2 days"],
    );
    let summary = importer
        .import_from_bytes(services.as_bytes(), DomainType::Service)
        .await
        .unwrap();
    assert_eq!(summary.succeeded, 1);

    assert_eq!(count_rows(&db_path, DomainType::Product), 1);
    assert_eq!(count_rows(&db_path, DomainType::Service), 1);
}

#[tokio::test]
async fn test_import_from_csv_checks_path() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let importer = build_importer(&db_path, MockConfig::translation_disabled(), Vec::new());

    let err = importer
        .import_from_csv("/nonexistent/games.csv", DomainType::Game)
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));

    let xlsx = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let err = importer
        .import_from_csv(xlsx.path(), DomainType::Game)
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));

    let csv_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    std::fs::write(csv_file.path(), csv_text(GAME_HEADER, &[HOLLOW_KNIGHT])).unwrap();
    let summary = importer
        .import_from_csv(csv_file.path(), DomainType::Game)
        .await
        .unwrap();
    assert_eq!(summary.succeeded, 1);
}

#[tokio::test]
async fn test_long_description_truncated_on_wire_only() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let provider = MockProvider::failing("mock");
    let config = MockConfig {
        max_text_length: 10,
        ..MockConfig::fast()
    };
    let importer = build_importer(&db_path, config, provider_chain(&[&provider]));

    let csv = csv_text(
        GAME_HEADER,
        &["a.jpg,A,1 GB,2020,PC Game,1,USD,Explore the long corridor,,"],
    );
    importer
        .import_from_bytes(csv.as_bytes(), DomainType::Game)
        .await
        .unwrap();

    assert_eq!(provider.seen_texts(), vec!["Explore..."]);
    assert_eq!(
        load_games(&db_path)[0].description,
        "Explore the long corridor"
    );
}
