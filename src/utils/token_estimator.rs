/// 基于字符构成的轻量token估算器
///
/// 提示词以英文为主，但补充上下文和配置可能混入中文，
/// 两类字符按不同的字符/token比率折算。
pub struct TokenEstimator {
    english_chars_per_token: f64,
    chinese_chars_per_token: f64,
    base_overhead: usize,
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEstimator {
    pub fn new() -> Self {
        // GPT系列模型的经验比率
        Self {
            english_chars_per_token: 4.0,
            chinese_chars_per_token: 1.5,
            base_overhead: 50,
        }
    }

    /// 估算文本的token数量
    pub fn estimate_tokens(&self, text: &str) -> usize {
        let mut chinese_chars = 0usize;
        let mut other_chars = 0usize;
        for c in text.chars() {
            if is_cjk(c) {
                chinese_chars += 1;
            } else {
                other_chars += 1;
            }
        }

        let chinese_tokens =
            (chinese_chars as f64 / self.chinese_chars_per_token).ceil() as usize;
        // 非CJK字符统一按英文比率折算
        let other_tokens = (other_chars as f64 / self.english_chars_per_token).ceil() as usize;

        chinese_tokens + other_tokens + self.base_overhead
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF |  // CJK统一汉字
        0x3400..=0x4DBF |  // CJK扩展A
        0x20000..=0x2A6DF | // CJK扩展B
        0x2A700..=0x2B73F | // CJK扩展C
        0x2B740..=0x2B81F | // CJK扩展D
        0x2B820..=0x2CEAF | // CJK扩展E
        0x2CEB0..=0x2EBEF | // CJK扩展F
        0x30000..=0x3134F   // CJK扩展G
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_text_rate() {
        let estimator = TokenEstimator::new();
        // 40个英文字符约10个token，外加基础开销
        assert_eq!(estimator.estimate_tokens(&"a".repeat(40)), 10 + 50);
    }

    #[test]
    fn test_chinese_text_costs_more_per_char() {
        let estimator = TokenEstimator::new();
        let english = estimator.estimate_tokens(&"a".repeat(30));
        let chinese = estimator.estimate_tokens(&"汉".repeat(30));
        assert!(chinese > english);
    }

    #[test]
    fn test_empty_text_only_base_overhead() {
        let estimator = TokenEstimator::new();
        assert_eq!(estimator.estimate_tokens(""), 50);
    }
}
