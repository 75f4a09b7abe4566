/// 分数标注：始终保留一位小数，仅当分数恰好为 1 时使用单数
///
/// `1.0 → [1.0 mark]`，`1.5 → [1.5 marks]`，`2.0 → [2.0 marks]`
pub fn marks_annotation(marks: f64) -> String {
    let unit = if marks == 1.0 { "mark" } else { "marks" };
    format!("[{} {}]", one_decimal(marks), unit)
}

/// 保留一位小数，恰好在中间时进位（`1.25 → 1.3`）；`{:.1}` 在这里会取偶数
fn one_decimal(value: f64) -> String {
    let tenths = (value * 10.0).round();
    format!("{:.1}", tenths / 10.0)
}

/// 小题标签：`(a)`、`(b)`……按下标递增
pub fn sub_question_label(index: usize) -> String {
    let letter = u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32(u32::from(b'a') + i))
        .unwrap_or('?');
    format!("({})", letter)
}

/// 分区总分等数值的显示：整数不带小数点
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// 转义插入到 HTML 中的文本
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_annotation_pluralization() {
        assert_eq!(marks_annotation(1.0), "[1.0 mark]");
        assert_eq!(marks_annotation(1.5), "[1.5 marks]");
        assert_eq!(marks_annotation(2.0), "[2.0 marks]");
        assert_eq!(marks_annotation(0.0), "[0.0 marks]");
        assert_eq!(marks_annotation(10.0 / 3.0), "[3.3 marks]");
    }

    #[test]
    fn test_marks_annotation_rounds_half_up() {
        // 5 分 4 题，每题 1.25 分
        assert_eq!(marks_annotation(5.0 / 4.0), "[1.3 marks]");
        assert_eq!(marks_annotation(0.25), "[0.3 marks]");
        assert_eq!(marks_annotation(2.25), "[2.3 marks]");
    }

    #[test]
    fn test_sub_question_labels() {
        assert_eq!(sub_question_label(0), "(a)");
        assert_eq!(sub_question_label(1), "(b)");
        assert_eq!(sub_question_label(25), "(z)");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
