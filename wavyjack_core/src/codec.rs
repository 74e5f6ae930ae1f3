use crate::error::{GameError, GameResult};
use crate::state::GameState;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

// --- 状态串编解码 ---
// 服务器不保存任何牌局，状态以不透明字符串的形式交给客户端，下一次请求时原样带回。
// 格式：GameState 的 JSON，再做 URL-safe、无填充的 base64。

/// 把状态编码成状态串
pub fn encode_state(state: &GameState) -> String {
    // GameState 只含单元枚举、Vec 和 bool，没有 map 键或自定义 Serialize，序列化不会失败
    let json = serde_json::to_vec(state).expect("GameState 序列化不会失败");
    URL_SAFE_NO_PAD.encode(json)
}

/// 解码状态串
///
/// base64 非法、JSON 非法、缺少字段，或者牌不能组成完整一副牌时，都返回 `GameError::MalformedState`。
pub fn decode_state(blob: &str) -> GameResult<GameState> {
    let bytes = URL_SAFE_NO_PAD
        .decode(blob.trim())
        .map_err(|e| GameError::MalformedState(format!("invalid base64: {e}")))?;
    let state: GameState = serde_json::from_slice(&bytes)
        .map_err(|e| GameError::MalformedState(format!("invalid json: {e}")))?;
    if !state.is_consistent() {
        return Err(GameError::MalformedState("cards do not form a single 52-card deck".to_string()));
    }
    Ok(state)
}

/// 还原上一个状态
///
/// 没有状态串，或者状态串损坏时，退回到一个新构造的空牌局。
pub fn derive_state(blob: Option<&str>) -> GameState {
    derive_state_with(blob, |_| {})
}

/// 同 `derive_state`，状态串损坏时先把解码错误交给 `on_malformed` (例如记录日志)，再退回空牌局
pub fn derive_state_with<F: FnOnce(GameError)>(blob: Option<&str>, on_malformed: F) -> GameState {
    match blob.filter(|b| !b.trim().is_empty()).map(decode_state) {
        Some(Ok(state)) => state,
        Some(Err(e)) => {
            on_malformed(e);
            GameState::default()
        }
        None => GameState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{start_new_game, stand};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_encoded_state_decodes_to_equal_state() {
        let mut rng = StdRng::seed_from_u64(7);
        let started = start_new_game(&mut rng).unwrap();
        let finished = stand(&started, &mut rng).unwrap();

        for state in [GameState::default(), started, finished] {
            let blob = encode_state(&state);
            assert!(!blob.contains('='), "状态串不应带填充");
            assert_eq!(decode_state(&blob).unwrap(), state);
        }
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let blob = encode_state(&GameState::default());
        let json = String::from_utf8(URL_SAFE_NO_PAD.decode(blob).unwrap()).unwrap();
        assert!(json.starts_with(r#"{"playerHand":[],"dealerHand":[],"deck":[{"suit":"hearts","value":"2"}"#));
        assert!(json.ends_with(r#""gameOver":false}"#));
    }

    #[test]
    fn test_malformed_blobs_are_rejected() {
        assert!(matches!(decode_state("not base64!"), Err(GameError::MalformedState(_))));

        let not_json = URL_SAFE_NO_PAD.encode("hello");
        assert!(matches!(decode_state(&not_json), Err(GameError::MalformedState(_))));

        // 缺少 playerHand 字段
        let missing_field = URL_SAFE_NO_PAD.encode(r#"{"dealerHand":[],"deck":[],"gameOver":false}"#);
        assert!(matches!(decode_state(&missing_field), Err(GameError::MalformedState(_))));

        // 字段齐全但牌不完整
        let incomplete = URL_SAFE_NO_PAD.encode(r#"{"playerHand":[],"dealerHand":[],"deck":[],"gameOver":false}"#);
        assert!(matches!(decode_state(&incomplete), Err(GameError::MalformedState(_))));
    }

    #[test]
    fn test_derive_state_falls_back_to_default() {
        assert_eq!(derive_state(None), GameState::default());
        assert_eq!(derive_state(Some("")), GameState::default());
        assert_eq!(derive_state(Some("%%%")), GameState::default());

        let mut rng = StdRng::seed_from_u64(3);
        let state = start_new_game(&mut rng).unwrap();
        assert_eq!(derive_state(Some(&encode_state(&state))), state);
    }

    #[test]
    fn test_derive_state_reports_malformed_blob() {
        let mut reported = None;
        let state = derive_state_with(Some("%%%"), |e| reported = Some(e));
        assert_eq!(state, GameState::default());
        assert!(matches!(reported, Some(GameError::MalformedState(_))));

        // 缺省和空串不算损坏
        let mut called = false;
        derive_state_with(None, |_| called = true);
        derive_state_with(Some("  "), |_| called = true);
        assert!(!called);
    }
}
