use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{DialogAPI, PlaceAPI},
    entities::{Dialog, Place, PlaceCandidate},
    error::Error,
};

#[async_trait]
impl DialogAPI for Engine {
    async fn dialog(&self) -> Dialog {
        self.state.lock().await.dialog
    }

    #[tracing::instrument(skip(self))]
    async fn open_dialog(&self) -> Dialog {
        let mut state = self.state.lock().await;
        state.dialog.open();
        tracing::info!("dialog is {}", state.dialog.name());

        state.dialog
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_dialog(&self) -> Result<Dialog, Error> {
        let mut state = self.state.lock().await;
        state.dialog.cancel()?;
        tracing::info!("dialog is {}", state.dialog.name());

        Ok(state.dialog)
    }

    /// Adds the place and closes the dialog. On failure the dialog stays open for a retry.
    #[tracing::instrument(skip(self))]
    async fn submit_dialog(&self, candidate: PlaceCandidate) -> Result<Place, Error> {
        self.state.lock().await.dialog.ensure_open()?;

        let place = self.add_place(candidate).await?;

        let mut state = self.state.lock().await;
        if state.dialog.complete().is_err() {
            tracing::warn!("dialog was closed while the submission was in flight");
        }

        Ok(place)
    }
}
