#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameView {
    #[default]
    Title,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    Start,
    Retry,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    None,
    ResetSession,
    ShowRetry,
}

impl GameView {
    /// Pure transition function for the screen the player is looking at.
    ///
    /// Side-effects (building a fresh session, showing the retry prompt) are reported through
    /// `ViewEffect` so the loop controller stays the only place that touches game state.
    pub fn handle(self, event: ViewEvent) -> (GameView, ViewEffect) {
        match (self, event) {
            (GameView::Title, ViewEvent::Start) => (GameView::Playing, ViewEffect::ResetSession),
            (GameView::Playing, ViewEvent::GameOver) => (GameView::GameOver, ViewEffect::ShowRetry),
            (GameView::GameOver, ViewEvent::Retry) => {
                (GameView::Playing, ViewEffect::ResetSession)
            }

            // Ignore irrelevant events in the current state.
            (state, _) => (state, ViewEffect::None),
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, GameView::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_title() {
        assert_eq!(GameView::default(), GameView::Title);
    }

    #[test]
    fn start_from_title_enters_play_and_requests_reset() {
        assert_eq!(
            GameView::Title.handle(ViewEvent::Start),
            (GameView::Playing, ViewEffect::ResetSession)
        );
    }

    #[test]
    fn start_is_ignored_once_playing_or_over() {
        assert_eq!(
            GameView::Playing.handle(ViewEvent::Start),
            (GameView::Playing, ViewEffect::None)
        );
        assert_eq!(
            GameView::GameOver.handle(ViewEvent::Start),
            (GameView::GameOver, ViewEffect::None)
        );
    }

    #[test]
    fn game_over_while_playing_shows_retry() {
        assert_eq!(
            GameView::Playing.handle(ViewEvent::GameOver),
            (GameView::GameOver, ViewEffect::ShowRetry)
        );
    }

    #[test]
    fn retry_only_works_after_game_over() {
        assert_eq!(
            GameView::GameOver.handle(ViewEvent::Retry),
            (GameView::Playing, ViewEffect::ResetSession)
        );
        assert_eq!(
            GameView::Title.handle(ViewEvent::Retry),
            (GameView::Title, ViewEffect::None)
        );
        assert_eq!(
            GameView::Playing.handle(ViewEvent::Retry),
            (GameView::Playing, ViewEffect::None)
        );
    }
}
