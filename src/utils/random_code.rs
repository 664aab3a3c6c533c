use rand::Rng;
use rand::distr::Alphanumeric;

/// 生成指定长度的字母数字随机串
pub fn generate_random_code(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code() {
        let code = generate_random_code(24);
        assert_eq!(code.len(), 24);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(code, generate_random_code(24));
    }
}
