use thiserror::Error;

/// 游戏引擎可能返回的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 牌堆已空，无法继续抽牌。单副牌单人游戏里不应出现，但必须安全失败。
    #[error("deck exhausted: no cards left to draw")]
    DeckExhausted,
    /// 对已结束的牌局执行 hit / stand
    #[error("game is already over")]
    GameAlreadyOver,
    /// 客户端传回的状态串无法解码，或者不满足 52 张牌的划分约束
    #[error("malformed game state: {0}")]
    MalformedState(String),
}

pub type GameResult<T> = Result<T, GameError>;
