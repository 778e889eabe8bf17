//! 引擎设置
//!
//! 优先级：命令行参数 > 配置文件 > 默认值。
//! 未指定配置文件时读取系统配置目录下的 `xiangqi/engine.json`（存在时）。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use xiangqi_ai::{AiConfig, Difficulty};

/// 配置文件内容，字段都可以省略
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub difficulty: Option<Difficulty>,
    pub depth: Option<u8>,
}

impl EngineSettings {
    /// 默认配置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("xiangqi");
            path.push("engine.json");
            path
        })
    }

    /// 从指定文件加载，读取或解析失败时返回错误
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    /// 从默认位置加载，文件不存在或无效时使用默认设置
    pub fn load_default() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::debug!("无法获取配置目录，使用默认设置");
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(settings) => {
                tracing::info!("已加载设置: {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("{:#}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 合并命令行参数，生成 AI 配置
    ///
    /// 只给出难度时使用该难度的默认深度。
    pub fn resolve(&self, difficulty: Option<Difficulty>, depth: Option<u8>) -> AiConfig {
        let difficulty = difficulty.or(self.difficulty).unwrap_or_default();
        let depth = depth.or(self.depth).unwrap_or_else(|| difficulty.depth());
        AiConfig::from_difficulty(difficulty).with_depth(depth)
    }
}

/// 加载配置文件（或默认位置的配置）并合并命令行参数
pub fn load_ai_config(
    path: Option<&Path>,
    difficulty: Option<Difficulty>,
    depth: Option<u8>,
) -> Result<AiConfig> {
    let settings = match path {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::load_default(),
    };
    Ok(settings.resolve(difficulty, depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = EngineSettings::default().resolve(None, None);
        assert_eq!(config, AiConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let settings = EngineSettings {
            difficulty: Some(Difficulty::Hard),
            depth: Some(5),
        };

        let config = settings.resolve(None, None);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.depth, 5);

        let config = settings.resolve(Some(Difficulty::Easy), None);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.depth, 5);

        let config = settings.resolve(None, Some(1));
        assert_eq!(config.depth, 1);
    }

    #[test]
    fn test_difficulty_sets_depth() {
        let settings = EngineSettings {
            difficulty: Some(Difficulty::Hard),
            depth: None,
        };
        assert_eq!(settings.resolve(None, None).depth, 4);
        assert_eq!(settings.resolve(Some(Difficulty::Easy), None).depth, 2);
        // 深度 0 按 1 处理
        assert_eq!(settings.resolve(None, Some(0)).depth, 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"difficulty": "easy"}"#).unwrap();

        let config = load_ai_config(Some(&path), None, None).unwrap();
        assert_eq!(config, AiConfig::from_difficulty(Difficulty::Easy));

        let config = load_ai_config(Some(&path), None, Some(3)).unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.depth, 3);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(load_ai_config(Some(&missing), None, None).is_err());

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, r#"{"difficulty": "expert"}"#).unwrap();
        let err = load_ai_config(Some(&invalid), None, None).unwrap_err();
        assert!(format!("{:#}", err).contains("解析配置文件失败"));
    }
}
