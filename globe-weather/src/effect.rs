//! Effects: side effects declared by the reducer and run by the runtime.

use std::sync::Arc;

use globe_weather_core::{Location, RequestId, WeatherSource};
use tracing::warn;
use tui_dispatch::{EffectContext, TaskManager};

use crate::action::Action;

/// Task key for the weather fetch. At most one runs at a time.
pub const WEATHER_TASK: &str = "weather";

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch current weather at `location`, tagged with `request`.
    FetchWeather {
        request: RequestId,
        location: Location,
    },
}

/// Effect handler for [`tui_dispatch::EffectRuntime::run`], backed by a
/// weather source.
pub fn weather_effects<W: WeatherSource>(
    source: Arc<W>,
) -> impl FnMut(Effect, &mut EffectContext<'_, Action>) {
    move |effect: Effect, ctx: &mut EffectContext<'_, Action>| {
        spawn_effect(&source, effect, ctx.tasks())
    }
}

/// Start the task for `effect`.
///
/// A new fetch replaces the running one under [`WEATHER_TASK`], so a
/// superseded request is aborted rather than left to finish.
pub fn spawn_effect<W: WeatherSource>(
    source: &Arc<W>,
    effect: Effect,
    tasks: &mut TaskManager<Action>,
) {
    match effect {
        Effect::FetchWeather { request, location } => {
            let source = Arc::clone(source);
            tasks.spawn(WEATHER_TASK, async move {
                match source.current(location).await {
                    Ok(snapshot) => Action::WeatherDidLoad {
                        request,
                        location,
                        snapshot,
                    },
                    Err(e) => {
                        warn!(request = %request, %location, error = %e, "weather fetch failed");
                        Action::WeatherDidError {
                            request,
                            message: e.to_string(),
                        }
                    }
                }
            });
        }
    }
}
