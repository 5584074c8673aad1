// ==========================================
// 商城后台批量导入 - 命令行入口
// ==========================================
// 用法:
//   storefront-import import <game|product|service> <file.csv>
//   storefront-import template <game|product|service> [输出路径]
// 环境变量:
//   STOREFRONT_IMPORT_DB_PATH  数据库路径
//   STOREFRONT_IMPORT_LOCALE   提示语言（en / es / zh-CN）
// ==========================================

use std::process::ExitCode;

use storefront_import::api::ImportApi;
use storefront_import::db::get_default_db_path;
use storefront_import::{i18n, logging};

const LOCALE_ENV: &str = "STOREFRONT_IMPORT_LOCALE";

fn print_usage() {
    eprintln!("{} v{}", storefront_import::APP_NAME, storefront_import::VERSION);
    eprintln!();
    eprintln!("用法:");
    eprintln!("  storefront-import import <game|product|service> <file.csv>");
    eprintln!("  storefront-import template <game|product|service> [输出路径]");
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    if let Ok(locale) = std::env::var(LOCALE_ENV) {
        if !i18n::set_locale(locale.trim()) {
            tracing::warn!(locale = %locale, "不支持的语言，沿用默认语言");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let db_path = get_default_db_path();
    tracing::info!(db_path = %db_path, "使用数据库");
    let api = ImportApi::new(db_path);

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["import", domain, file] => match api.import_catalog(file, domain).await {
            Ok(response) => {
                println!("{}", response.message);
                for rejection in &response.rejections {
                    println!("  #{}: {}", rejection.row_number, rejection.message);
                }
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => tracing::debug!(response = %json, "导入结果"),
                    Err(e) => tracing::warn!(error = %e, "导入结果序列化失败"),
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
        ["template", domain, rest @ ..] if rest.len() <= 1 => {
            let template = match api.generate_template(domain) {
                Ok(template) => template,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            };

            match rest.first() {
                Some(out) => match std::fs::write(out, template.content.as_bytes()) {
                    Ok(()) => {
                        println!("{}", out);
                        ExitCode::SUCCESS
                    }
                    Err(e) => {
                        eprintln!("写入模板失败: {}", e);
                        ExitCode::FAILURE
                    }
                },
                None => {
                    print!("{}", template.content);
                    ExitCode::SUCCESS
                }
            }
        }
        _ => {
            print_usage();
            ExitCode::from(2)
        }
    }
}
