/*
 * 难度配置
 *
 * Difficulty 是搜索的只读输入：搜索深度（步）、思考时间上限、随机走子概率。
 * 低难度通过浅搜索 + 随机走子来"放水"。
 */

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::constant::MAX_DEPTH;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("search depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u32, max: u32 },
    #[error("randomness must be a probability in [0, 1], got {0}")]
    InvalidRandomness(f64),
    #[error("unknown difficulty level `{0}`")]
    UnknownLevel(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    depth: u32,
    thinking_time: Duration,
    randomness: f64,
}

impl Difficulty {
    pub fn new(depth: u32, thinking_time: Duration, randomness: f64) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if depth > MAX_DEPTH {
            return Err(ConfigError::DepthTooLarge { depth, max: MAX_DEPTH });
        }
        if !(0.0..=1.0).contains(&randomness) {
            return Err(ConfigError::InvalidRandomness(randomness));
        }
        Ok(Difficulty {
            depth,
            thinking_time,
            randomness,
        })
    }

    /// 搜索深度（步数）
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// 思考时间上限，超时返回已完成的最深一层结果
    pub fn thinking_time(&self) -> Duration {
        self.thinking_time
    }

    /// 搜索结束后改走随机合法着法的概率
    pub fn randomness(&self) -> f64 {
        self.randomness
    }

    pub fn with_thinking_time(self, thinking_time: Duration) -> Self {
        Difficulty { thinking_time, ..self }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Level::Medium.difficulty()
    }
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        level.difficulty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Beginner,
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Level {
    pub const ALL: [Level; 5] = [Level::Beginner, Level::Easy, Level::Medium, Level::Hard, Level::Expert];

    pub fn difficulty(self) -> Difficulty {
        let (depth, millis, randomness) = match self {
            Level::Beginner => (1, 300, 0.30),
            Level::Easy => (2, 800, 0.15),
            Level::Medium => (3, 2_000, 0.05),
            Level::Hard => (4, 5_000, 0.0),
            Level::Expert => (5, 10_000, 0.0),
        };
        Difficulty {
            depth,
            thinking_time: Duration::from_millis(millis),
            randomness,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
            Level::Expert => "expert",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Level::ALL
            .into_iter()
            .find(|level| level.name() == name)
            .ok_or_else(|| ConfigError::UnknownLevel(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::*;

    #[test]
    fn test_validation() {
        let second = Duration::from_secs(1);
        assert!(Difficulty::new(3, second, 0.0).is_ok());
        assert!(Difficulty::new(1, second, 1.0).is_ok());
        assert_eq!(Difficulty::new(0, second, 0.0), Err(ConfigError::ZeroDepth));
        assert_eq!(
            Difficulty::new(MAX_DEPTH + 1, second, 0.0),
            Err(ConfigError::DepthTooLarge {
                depth: MAX_DEPTH + 1,
                max: MAX_DEPTH
            })
        );
        assert!(matches!(
            Difficulty::new(2, second, 1.5),
            Err(ConfigError::InvalidRandomness(_))
        ));
        assert!(matches!(
            Difficulty::new(2, second, f64::NAN),
            Err(ConfigError::InvalidRandomness(_))
        ));
    }

    #[test]
    fn test_levels_are_valid_and_ordered() {
        let mut previous: Option<Difficulty> = None;
        for level in Level::ALL {
            let d = level.difficulty();
            assert!(Difficulty::new(d.depth(), d.thinking_time(), d.randomness()).is_ok());
            if let Some(p) = previous {
                assert!(d.depth() > p.depth());
                assert!(d.thinking_time() > p.thinking_time());
                assert!(d.randomness() <= p.randomness());
            }
            previous = Some(d);
        }
        assert_eq!(Difficulty::default(), Level::Medium.difficulty());
        assert_eq!(Difficulty::from(Level::Beginner).depth(), 1);
        assert_eq!(Difficulty::from(Level::Hard), Level::Hard.difficulty());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("hard".parse::<Level>(), Ok(Level::Hard));
        assert_eq!(" Expert ".parse::<Level>(), Ok(Level::Expert));
        assert_eq!(
            "grandmaster".parse::<Level>(),
            Err(ConfigError::UnknownLevel("grandmaster".to_owned()))
        );
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
        }
        assert_eq!(
            ConfigError::UnknownLevel("x".into()).to_string(),
            "unknown difficulty level `x`"
        );
    }
}
