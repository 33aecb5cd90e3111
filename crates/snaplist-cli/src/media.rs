//! Reading photos and voice notes from disk into inline base64 assets.

use std::path::Path;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use snaplist_core::{ImageAsset, VoiceNote};

/// MIME type inferred from the file extension, or `None` if unrecognised.
pub(crate) fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "webm" => "audio/webm",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        _ => return None,
    };
    Some(mime)
}

fn read_base64(path: &Path) -> anyhow::Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}

/// Read a product photo.
///
/// # Errors
///
/// Fails when the file cannot be read or its extension is not a known image type.
pub(crate) fn read_image(path: &Path) -> anyhow::Result<ImageAsset> {
    let mime_type = mime_type_for(path)
        .filter(|m| m.starts_with("image/"))
        .ok_or_else(|| anyhow::anyhow!("{} is not a supported image file", path.display()))?;
    Ok(ImageAsset {
        data: read_base64(path)?,
        mime_type: mime_type.to_string(),
    })
}

/// Build the voice note from an audio file, a typed transcript, or both.
///
/// A transcript without audio yields a note with empty audio data.
pub(crate) fn read_voice_note(
    path: Option<&Path>,
    transcript: Option<&str>,
) -> anyhow::Result<Option<VoiceNote>> {
    let transcript = transcript.map(str::to_string);
    match path {
        Some(path) => {
            let mime_type = mime_type_for(path)
                .filter(|m| m.starts_with("audio/"))
                .ok_or_else(|| {
                    anyhow::anyhow!("{} is not a supported audio file", path.display())
                })?;
            Ok(Some(VoiceNote {
                data: read_base64(path)?,
                mime_type: mime_type.to_string(),
                transcript,
            }))
        }
        None => Ok(transcript.map(|t| VoiceNote {
            data: String::new(),
            mime_type: "text/plain".to_string(),
            transcript: Some(t),
        })),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn mime_type_is_case_insensitive() {
        assert_eq!(mime_type_for(Path::new("a/photo.JPG")), Some("image/jpeg"));
        assert_eq!(mime_type_for(Path::new("note.m4a")), Some("audio/mp4"));
        assert_eq!(mime_type_for(Path::new("notes.txt")), None);
        assert_eq!(mime_type_for(Path::new("noext")), None);
    }

    #[test]
    fn read_image_encodes_file_as_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chair.png");
        std::fs::write(&path, b"hello").unwrap();

        let image = read_image(&path).unwrap();
        assert_eq!(image.data, "aGVsbG8=");
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn read_image_rejects_audio_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp3");
        std::fs::write(&path, b"x").unwrap();

        assert!(read_image(&path).is_err());
    }

    #[test]
    fn read_image_reports_missing_file() {
        let err = read_image(&PathBuf::from("/nonexistent/photo.jpg")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn voice_note_from_audio_and_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.webm");
        std::fs::write(&path, b"hello").unwrap();

        let note = read_voice_note(Some(&path), Some("blue vase"))
            .unwrap()
            .unwrap();
        assert_eq!(note.mime_type, "audio/webm");
        assert_eq!(note.data, "aGVsbG8=");
        assert_eq!(note.usable_transcript(), Some("blue vase"));
    }

    #[test]
    fn transcript_alone_builds_text_note() {
        let note = read_voice_note(None, Some("blue vase")).unwrap().unwrap();
        assert!(note.data.is_empty());
        assert_eq!(note.transcript.as_deref(), Some("blue vase"));
    }

    #[test]
    fn no_voice_input_is_none() {
        assert!(read_voice_note(None, None).unwrap().is_none());
    }
}
