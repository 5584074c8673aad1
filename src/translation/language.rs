// ==========================================
// 商城后台批量导入 - 目标语言检测
// ==========================================
// 方法: 停用词命中 + 西语特有字符（启发式，仅支持 es / en）
// 用途: 已是目标语言的描述跳过翻译
// ==========================================

const SPANISH_STOP_WORDS: &[&str] = &[
    "el", "la", "los", "las", "de", "del", "y", "que", "en", "un", "una", "es", "con", "para",
    "por", "su", "sus", "al", "lo", "como", "pero", "este", "esta", "muy", "sin", "sobre",
    "tu", "más",
];

const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "and", "of", "to", "in", "is", "it", "you", "that", "with", "for", "on", "this",
    "are", "as", "be", "your", "from", "at", "an", "or", "by", "its", "into",
];

const SPANISH_MARKS: &[char] = &['ñ', 'á', 'é', 'í', 'ó', 'ú', 'ü', '¿', '¡'];

/// 最少命中数（低于此值视为无法判断）
const MIN_EVIDENCE: usize = 2;

#[derive(Debug, Default, PartialEq, Eq)]
struct Scores {
    spanish: usize,      // 西语停用词命中数
    english: usize,      // 英语停用词命中数
    spanish_marks: bool, // 是否出现西语特有字符
}

fn score(text: &str) -> Scores {
    let lower = text.to_lowercase();
    let mut scores = Scores::default();

    for word in lower.split(|c: char| !c.is_alphabetic()).filter(|w| !w.is_empty()) {
        if SPANISH_STOP_WORDS.contains(&word) {
            scores.spanish += 1;
        }
        if ENGLISH_STOP_WORDS.contains(&word) {
            scores.english += 1;
        }
    }
    // 专有名词里的重音（Pokémon）很常见，整段文本最多计一次
    scores.spanish_marks = lower.chars().any(|c| SPANISH_MARKS.contains(&c));
    scores
}

/// 判断文本是否已是指定语言
///
/// # 返回
/// - true: 有足够证据表明文本已是该语言
/// - false: 不是或无法判断（不支持的语言一律 false）
///
/// 西语判定必须有停用词命中且多于英语停用词；特有字符只用于凑足证据数
pub fn looks_like_language(text: &str, language: &str) -> bool {
    let scores = score(text);
    match language.to_lowercase().as_str() {
        "es" => {
            let evidence = scores.spanish + usize::from(scores.spanish_marks);
            scores.spanish > 0 && evidence >= MIN_EVIDENCE && scores.spanish > scores.english
        }
        "en" => scores.english >= MIN_EVIDENCE && scores.english > scores.spanish,
        _ => false,
    }
}
