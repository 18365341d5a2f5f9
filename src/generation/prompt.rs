//! Fixed instructions and output schema sent with every generation request.

use serde_json::{Value, json};

pub const SYSTEM_INSTRUCTION: &str = "
Bạn là một chuyên gia tạo đề thi trắc nghiệm. Nhiệm vụ của bạn là phân tích tài liệu được cung cấp và trích xuất các câu hỏi trắc nghiệm.
1. Nếu tài liệu đã có sẵn câu hỏi, hãy trích xuất chính xác.
2. Nếu tài liệu là nội dung văn bản chưa có câu hỏi, hãy TỰ ĐỘNG TẠO câu hỏi trắc nghiệm dựa trên nội dung đó.
3. Luôn đảm bảo có 4 đáp án (A, B, C, D) cho mỗi câu hỏi.
4. Xác định đáp án đúng chính xác.
5. Ngôn ngữ đầu ra phải giống với ngôn ngữ của tài liệu (ưu tiên Tiếng Việt).
";

pub const USER_PROMPT: &str = "Hãy tạo danh sách câu hỏi trắc nghiệm từ tài liệu này. Trả về JSON.";

/// Low temperature favours faithful extraction over creative variation.
pub const TEMPERATURE: f32 = 0.3;

/// Structured-output schema: an array of question objects.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": {
                    "type": "STRING",
                    "description": "Unique identifier for the question (e.g., q1, q2)"
                },
                "text": {
                    "type": "STRING",
                    "description": "The content of the question"
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "An array of exactly 4 strings representing options"
                },
                "correctAnswer": {
                    "type": "STRING",
                    "description": "The exact string content of the correct option"
                },
                "explanation": {
                    "type": "STRING",
                    "description": "Brief explanation why the answer is correct"
                }
            },
            "required": ["id", "text", "options", "correctAnswer"]
        }
    })
}
