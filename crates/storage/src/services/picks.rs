use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::projection::BracketProjection;
use crate::dto::bracket::BracketView;
use crate::dto::pick::RecordPickRequest;
use crate::error::{BracketError, BracketResult};
use crate::models::{Actor, Participant, Pick};
use crate::store::BracketStore;

async fn participant_of(
    store: &dyn BracketStore,
    actor: &Actor,
    challenge_id: Uuid,
) -> BracketResult<Participant> {
    Ok(store.find_participant(challenge_id, actor.user_id).await?)
}

async fn load_projection(
    store: &dyn BracketStore,
    challenge_id: Uuid,
    participant_id: Uuid,
) -> BracketResult<BracketProjection> {
    let matches = store.get_matches(challenge_id, None).await?;
    let picks = store.get_picks(participant_id).await?;
    BracketProjection::project(&matches, &picks)
}

/// The actor's bracket as currently stored.
pub async fn bracket_view(
    store: &dyn BracketStore,
    actor: &Actor,
    challenge_id: Uuid,
    now: DateTime<Utc>,
) -> BracketResult<BracketView> {
    let challenge = store.get_challenge(challenge_id).await?;
    let participant = participant_of(store, actor, challenge_id).await?;

    let projection = load_projection(store, challenge_id, participant.participant_id).await?;
    Ok(projection.view(challenge.is_locked(now)))
}

pub async fn list_picks(
    store: &dyn BracketStore,
    actor: &Actor,
    challenge_id: Uuid,
) -> BracketResult<Vec<Pick>> {
    let participant = participant_of(store, actor, challenge_id).await?;
    Ok(store.get_picks(participant.participant_id).await?)
}

/// Records the actor's predicted winner for one match and returns the refreshed bracket.
///
/// The winner is checked against the contestants of the actor's own projected bracket,
/// so later-round picks must follow earlier ones. Nothing is written when the challenge
/// is locked or the name is not a contestant.
pub async fn record_pick(
    store: &dyn BracketStore,
    actor: &Actor,
    challenge_id: Uuid,
    request: &RecordPickRequest,
    now: DateTime<Utc>,
) -> BracketResult<BracketView> {
    let challenge = store.get_challenge(challenge_id).await?;
    if challenge.is_locked(now) {
        tracing::debug!(%challenge_id, user_id = %actor.user_id, "Pick rejected, challenge locked");
        return Err(BracketError::ChallengeLocked);
    }

    let participant = participant_of(store, actor, challenge_id).await?;

    let mut projection =
        load_projection(store, challenge_id, participant.participant_id).await?;
    if !projection.contains_match(request.match_id) {
        return Err(BracketError::NotFound);
    }
    projection.apply_pick(request.match_id, &request.winner)?;

    let target = store.get_match(request.match_id).await?;
    store
        .upsert_pick(
            participant.participant_id,
            request.match_id,
            target.round,
            &request.winner,
        )
        .await?;

    tracing::debug!(
        %challenge_id,
        participant_id = %participant.participant_id,
        match_id = %request.match_id,
        winner = %request.winner,
        "Pick recorded"
    );

    let refreshed = load_projection(store, challenge_id, participant.participant_id).await?;
    Ok(refreshed.view(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::services::testing::{Fixture, days_after, days_before};

    #[tokio::test]
    async fn test_record_pick_twice_overwrites() {
        let fx = Fixture::eight(days_after(7)).await;
        let qf = fx.match_at(1, 0).await;

        for winner in ["A", "B"] {
            let req = RecordPickRequest {
                match_id: qf.match_id,
                winner: winner.to_string(),
            };
            record_pick(&fx.store, &fx.player, fx.challenge_id, &req, Utc::now())
                .await
                .unwrap();
        }

        let picks = list_picks(&fx.store, &fx.player, fx.challenge_id)
            .await
            .unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].match_id, qf.match_id);
        assert_eq!(picks[0].picked_player, "B");
    }

    #[tokio::test]
    async fn test_record_pick_after_start_is_locked() {
        let fx = Fixture::eight(days_before(1)).await;
        let qf = fx.match_at(1, 0).await;
        let req = RecordPickRequest {
            match_id: qf.match_id,
            winner: "A".to_string(),
        };

        let err = record_pick(&fx.store, &fx.player, fx.challenge_id, &req, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, BracketError::ChallengeLocked));

        let picks = list_picks(&fx.store, &fx.player, fx.challenge_id)
            .await
            .unwrap();
        assert!(picks.is_empty());
    }

    #[tokio::test]
    async fn test_locked_leaves_prior_picks_unchanged() {
        let fx = Fixture::eight(days_after(1)).await;
        let qf = fx.match_at(1, 0).await;
        let req = RecordPickRequest {
            match_id: qf.match_id,
            winner: "A".to_string(),
        };
        record_pick(&fx.store, &fx.player, fx.challenge_id, &req, Utc::now())
            .await
            .unwrap();

        let later = Utc::now() + chrono::Duration::days(2);
        let change = RecordPickRequest {
            match_id: qf.match_id,
            winner: "B".to_string(),
        };
        let err = record_pick(&fx.store, &fx.player, fx.challenge_id, &change, later)
            .await
            .unwrap_err();
        assert!(matches!(err, BracketError::ChallengeLocked));

        let picks = list_picks(&fx.store, &fx.player, fx.challenge_id)
            .await
            .unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].picked_player, "A");

        let view = bracket_view(&fx.store, &fx.player, fx.challenge_id, later)
            .await
            .unwrap();
        assert!(view.locked);
        assert_eq!(view.find(qf.match_id).unwrap().winner.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_record_pick_rejects_non_contestant() {
        let fx = Fixture::eight(days_after(7)).await;
        let qf = fx.match_at(1, 0).await;
        let req = RecordPickRequest {
            match_id: qf.match_id,
            winner: "Z".to_string(),
        };

        let err = record_pick(&fx.store, &fx.player, fx.challenge_id, &req, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, BracketError::InvalidWinner { .. }));
        assert!(
            list_picks(&fx.store, &fx.player, fx.challenge_id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_later_round_pick_follows_earlier_picks() {
        let fx = Fixture::eight(days_after(7)).await;
        let semi = fx.match_at(2, 0).await;

        let early = RecordPickRequest {
            match_id: semi.match_id,
            winner: "A".to_string(),
        };
        let err = record_pick(&fx.store, &fx.player, fx.challenge_id, &early, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, BracketError::InvalidWinner { .. }));

        for (position, winner) in [(0, "A"), (1, "C")] {
            let m = fx.match_at(1, position).await;
            let req = RecordPickRequest {
                match_id: m.match_id,
                winner: winner.to_string(),
            };
            record_pick(&fx.store, &fx.player, fx.challenge_id, &req, Utc::now())
                .await
                .unwrap();
        }

        let view = record_pick(&fx.store, &fx.player, fx.challenge_id, &early, Utc::now())
            .await
            .unwrap();
        let semi_view = view.find(semi.match_id).unwrap();
        assert_eq!(semi_view.player1.as_deref(), Some("A"));
        assert_eq!(semi_view.player2.as_deref(), Some("C"));
        assert_eq!(semi_view.winner.as_deref(), Some("A"));
        assert_eq!(view.at(3, 0).unwrap().player1.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_non_participant_cannot_pick() {
        let fx = Fixture::eight(days_after(7)).await;
        let qf = fx.match_at(1, 0).await;
        let stranger = Actor::new(Uuid::new_v4());
        let req = RecordPickRequest {
            match_id: qf.match_id,
            winner: "A".to_string(),
        };

        let err = record_pick(&fx.store, &stranger, fx.challenge_id, &req, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, BracketError::NotFound));
    }

    #[tokio::test]
    async fn test_pick_for_other_challenge_match_is_not_found() {
        let fx = Fixture::eight(days_after(7)).await;
        let other = fx.create_eight(days_after(7)).await;
        let foreign = fx.match_in(other, 1, 0).await;

        let req = RecordPickRequest {
            match_id: foreign.match_id,
            winner: "A".to_string(),
        };
        let err = record_pick(&fx.store, &fx.player, fx.challenge_id, &req, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, BracketError::NotFound));
    }

    #[tokio::test]
    async fn test_missing_challenge() {
        let store = MemoryStore::new();
        let err = bracket_view(&store, &Actor::new(Uuid::new_v4()), Uuid::new_v4(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, BracketError::NotFound));
    }
}
