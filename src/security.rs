//! Security Module
//!
//! 入力サイズの制限と、出力ファイル名の無害化を提供するモジュール。

use std::io::Read;

use crate::error::XlsxToGherkinError;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// 入力全体をメモリに読み込む
    ///
    /// 上限を1バイトでも超えた時点で読み込みを打ち切り、
    /// `XlsxToGherkinError::SecurityViolation`を返します。
    pub fn read_input<R: Read>(&self, reader: R) -> Result<Vec<u8>, XlsxToGherkinError> {
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(XlsxToGherkinError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}

/// 出力ファイル名の語幹を生成する
///
/// `[A-Za-z0-9_-]`以外の文字（空白、パス区切り文字、ASCII以外の文字を含む）を
/// すべて取り除きます。結果にはパス区切り文字も前後の空白も含まれず、
/// 何度適用しても結果は変わりません。
///
/// # 例
///
/// * `"Pay Now!"` → `"PayNow"`
/// * `"../etc/passwd"` → `"etcpasswd"`
pub(crate) fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
