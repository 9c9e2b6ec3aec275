// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 内置默认库存文案存放于 locales/(en 为回退语言)
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码("en" 或 "zh-CN")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息
///
/// # 示例
/// ```no_run
/// use variation_stock_indicator::i18n::t;
/// let msg = t("stock_text.in_stock");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}
