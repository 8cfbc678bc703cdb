/// 按字符数截断文本，不会切断多字节字符
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// 提取内容中第一个以`##`开头的行作为章节标题
///
/// 标题文本为该行移除所有`##`后再修剪空白的结果。
pub fn first_heading(content: &str) -> Option<String> {
    content
        .lines()
        .find(|line| line.starts_with("##"))
        .map(|line| line.replace("##", "").trim().to_string())
}

/// 将标题转换为Markdown锚点：小写化并把空格替换为`-`
pub fn slugify(heading: &str) -> String {
    heading.to_lowercase().replace(' ', "-")
}
