use crate::error::ValidationError;
use crate::models::HireJobDocument;

/// 配送说明最大字符数（按 Unicode 码点计）
pub const MAX_INSTRUCTIONS_CHARS: usize = 512;

/// 序列化前校验文档
pub fn validate(document: &HireJobDocument) -> Result<(), ValidationError> {
    let length = document.delivery_instructions.chars().count();
    if length > MAX_INSTRUCTIONS_CHARS {
        return Err(ValidationError::InstructionsTooLong {
            length,
            max: MAX_INSTRUCTIONS_CHARS,
        });
    }

    Ok(())
}
