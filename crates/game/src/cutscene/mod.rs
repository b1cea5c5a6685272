//! Intro sequence: a timed run through chapter marks, skippable per chapter
//! with Space or entirely with P.

use bevy::prelude::*;

use crate::core::AppState;

#[derive(Resource, Debug, Clone)]
pub struct CutsceneTimeline {
    /// Start time of each chapter in seconds from the top.
    pub chapter_starts: Vec<f32>,
    pub duration: f32,
    pub elapsed: f32,
    pub chapter: usize,
}

impl Default for CutsceneTimeline {
    fn default() -> Self {
        Self {
            chapter_starts: vec![0.0, 6.0, 14.0, 22.0],
            duration: 30.0,
            elapsed: 0.0,
            chapter: 0,
        }
    }
}

impl CutsceneTimeline {
    /// Jumps to the next chapter mark. Returns false when there is none
    /// left, meaning the cutscene is over.
    pub fn skip_chapter(&mut self) -> bool {
        match self.chapter_starts.get(self.chapter + 1) {
            Some(&start) => {
                self.chapter += 1;
                self.elapsed = start;
                true
            }
            None => false,
        }
    }

    fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
        while self
            .chapter_starts
            .get(self.chapter + 1)
            .map(|&s| self.elapsed >= s)
            .unwrap_or(false)
        {
            self.chapter += 1;
        }
    }
}

fn run_cutscene(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut timeline: ResMut<CutsceneTimeline>,
    mut app_state: ResMut<NextState<AppState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        info!("cutscene skipped");
        app_state.set(AppState::InGame);
        return;
    }
    if keyboard.just_pressed(KeyCode::Space) && !timeline.skip_chapter() {
        app_state.set(AppState::InGame);
        return;
    }

    timeline.advance(time.delta_secs());
    if timeline.elapsed >= timeline.duration {
        app_state.set(AppState::InGame);
    }
}

fn reset_cutscene(mut timeline: ResMut<CutsceneTimeline>) {
    *timeline = CutsceneTimeline::default();
}

pub struct CutscenePlugin;

impl Plugin for CutscenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CutsceneTimeline>();
        app.add_systems(OnEnter(AppState::Cutscene), reset_cutscene);
        app.add_systems(Update, run_cutscene.run_if(in_state(AppState::Cutscene)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_walks_chapter_marks_then_ends() {
        let mut timeline = CutsceneTimeline::default();
        assert!(timeline.skip_chapter());
        assert_eq!(timeline.chapter, 1);
        assert_eq!(timeline.elapsed, 6.0);
        assert!(timeline.skip_chapter());
        assert!(timeline.skip_chapter());
        assert!(!timeline.skip_chapter());
    }

    #[test]
    fn advance_crosses_chapter_marks() {
        let mut timeline = CutsceneTimeline::default();
        timeline.advance(7.0);
        assert_eq!(timeline.chapter, 1);
        timeline.advance(20.0);
        assert_eq!(timeline.chapter, 3);
    }
}
