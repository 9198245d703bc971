/// Models module
/// Shared data types crossing the IPC boundary between the web front-end
/// and the Rust backend, plus the shape of the persisted session file.
/// Everything here must stay serializable.

use serde::{Deserialize, Serialize};

/// Languages the execution service accepts. The serde names are the wire
/// names the service expects in the `lang` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "python3")]
    Python3,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "cpp")]
    Cpp,
    #[serde(rename = "java")]
    Java,
}

impl Language {
    /// Hello-world source installed when a buffer is created or switches to
    /// this language.
    pub fn template(self) -> &'static str {
        match self {
            Language::Python3 => "print(\"Welcome to CodeBox\")\n",
            Language::C => {
                "#include <stdio.h>\nint main() {\n    printf(\"Welcome to CodeBox\");\n    return 0;\n}\n"
            }
            Language::Cpp => {
                "#include <iostream>\nusing namespace std;\nint main() {\n    cout << \"Welcome to CodeBox\";\n    return 0;\n}\n"
            }
            Language::Java => {
                "class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Welcome to CodeBox\");\n    }\n}\n"
            }
        }
    }

    /// File extension used when exporting a buffer of this language.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Python3 => "py",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// Syntax-mode hint for the front-end editor component.
    pub fn editor_mode(self) -> &'static str {
        match self {
            Language::Python3 => "python",
            Language::C | Language::Cpp => "c_cpp",
            Language::Java => "java",
        }
    }
}

/// One editable source unit. The `id` is assigned once by the session store
/// and never reused; run results are routed back by id, not by tab position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileBuffer {
    pub id: u64,
    pub language: Language,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl FileBuffer {
    pub fn new(id: u64, language: Language) -> Self {
        FileBuffer {
            id,
            language,
            source: language.template().to_string(),
            last_result: None,
            display_name: None,
        }
    }

    /// Name offered in the save-as dialog: the user label when one is set
    /// (extension appended when the label has none), otherwise a
    /// language-derived default.
    pub fn export_file_name(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => {
                if name.contains('.') {
                    name.to_string()
                } else {
                    format!("{}.{}", name, self.language.extension())
                }
            }
            _ => format!("code.{}", self.language.extension()),
        }
    }
}

/// Buffer as the front-end renders it: the persisted fields plus the
/// derived syntax-mode hint for the editor component.
#[derive(Debug, Clone, Serialize)]
pub struct BufferView {
    pub id: u64,
    pub language: Language,
    pub editor_mode: &'static str,
    pub source: String,
    pub last_result: Option<String>,
    pub display_name: Option<String>,
}

impl From<&FileBuffer> for BufferView {
    fn from(buffer: &FileBuffer) -> Self {
        BufferView {
            id: buffer.id,
            language: buffer.language,
            editor_mode: buffer.language.editor_mode(),
            source: buffer.source.clone(),
            last_result: buffer.last_result.clone(),
            display_name: buffer.display_name.clone(),
        }
    }
}

/// The aggregate written verbatim to the session file and rehydrated at
/// startup. The `executing` latch is deliberately not part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub buffers: Vec<FileBuffer>,
    pub active: usize,
    pub stdin: String,
}

/// Backend truth returned to the front-end after every command so it can
/// re-render without keeping state of its own.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub buffers: Vec<BufferView>,
    pub active: usize,
    pub stdin: String,
    pub executing: bool,
}

/// Payload for the download and copy-to-clipboard actions; the front-end
/// feeds it to the dialog/fs plugins.
#[derive(Debug, Clone, Serialize)]
pub struct ExportPayload {
    pub file_name: String,
    pub contents: String,
}
