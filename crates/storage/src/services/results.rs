use uuid::Uuid;

use crate::dto::tournament_match::UpdatePlayersRequest;
use crate::error::{BracketError, BracketResult};
use crate::models::{Actor, BracketLayout, MatchStatus, MatchUpdate, TournamentMatch};
use crate::store::BracketStore;

/// Official matches of a challenge, optionally limited to one round.
pub async fn list_matches(
    store: &dyn BracketStore,
    challenge_id: Uuid,
    round: Option<i32>,
) -> BracketResult<Vec<TournamentMatch>> {
    store.get_challenge(challenge_id).await?;
    Ok(store.get_matches(challenge_id, round).await?)
}

/// Loads a match of `challenge_id` after checking that `actor` administers it.
async fn admin_match(
    store: &dyn BracketStore,
    actor: &Actor,
    challenge_id: Uuid,
    match_id: Uuid,
) -> BracketResult<TournamentMatch> {
    let challenge = store.get_challenge(challenge_id).await?;
    if !challenge.is_admin(actor.user_id) {
        tracing::warn!(%challenge_id, user_id = %actor.user_id, "Non-admin tried to edit results");
        return Err(BracketError::Forbidden);
    }

    let found = store.get_match(match_id).await?;
    if found.challenge_id != challenge_id {
        return Err(BracketError::NotFound);
    }

    Ok(found)
}

/// Declares the official winner and moves them into the next round's match.
///
/// A completed next match only accepts the player it was already played with, so a
/// changed winner must be preceded by resetting the next match.
///
/// The two writes are not atomic: if advancing fails the declared result stays
/// committed and the error is returned so the caller can retry.
pub async fn declare_result(
    store: &dyn BracketStore,
    actor: &Actor,
    challenge_id: Uuid,
    match_id: Uuid,
    winner: &str,
) -> BracketResult<TournamentMatch> {
    let current = admin_match(store, actor, challenge_id, match_id).await?;

    let matches = store.get_matches(challenge_id, None).await?;
    let layout = BracketLayout::from_matches(&matches)?;
    let advancement = layout.advance(
        current.round,
        current.position,
        current.player1.as_deref(),
        current.player2.as_deref(),
        winner,
    )?;

    let next = match &advancement {
        Some(advancement) => {
            let next = store
                .find_match(
                    challenge_id,
                    advancement.target.round,
                    advancement.target.position,
                )
                .await?;
            if next.is_completed()
                && next.player(advancement.target.slot) != Some(advancement.player.as_str())
            {
                return Err(BracketError::MatchCompleted);
            }
            Some(next)
        }
        None => None,
    };

    let updated = store
        .update_match(
            match_id,
            &MatchUpdate::Result {
                winner: Some(winner.to_string()),
                status: MatchStatus::Completed,
            },
        )
        .await?;

    tracing::info!(
        %challenge_id,
        %match_id,
        round = current.round,
        position = current.position,
        winner,
        "Result declared"
    );

    if let (Some(advancement), Some(next)) = (advancement, next) {
        store
            .update_match(
                next.match_id,
                &MatchUpdate::Slot {
                    slot: advancement.target.slot,
                    player: Some(advancement.player),
                },
            )
            .await?;

        tracing::info!(
            %challenge_id,
            next_match_id = %next.match_id,
            slot = advancement.target.slot.column(),
            "Winner advanced"
        );
    }

    Ok(updated)
}

/// Clears a declared result. Matches the winner already advanced into keep their slot.
pub async fn reset_result(
    store: &dyn BracketStore,
    actor: &Actor,
    challenge_id: Uuid,
    match_id: Uuid,
) -> BracketResult<TournamentMatch> {
    admin_match(store, actor, challenge_id, match_id).await?;

    let updated = store
        .update_match(
            match_id,
            &MatchUpdate::Result {
                winner: None,
                status: MatchStatus::Pending,
            },
        )
        .await?;

    tracing::info!(%challenge_id, %match_id, "Result reset");

    Ok(updated)
}

/// Admin edit of a pending match's contestants.
pub async fn set_players(
    store: &dyn BracketStore,
    actor: &Actor,
    challenge_id: Uuid,
    match_id: Uuid,
    request: &UpdatePlayersRequest,
) -> BracketResult<TournamentMatch> {
    let current = admin_match(store, actor, challenge_id, match_id).await?;

    if current.is_completed() {
        return Err(BracketError::MatchCompleted);
    }
    if let (Some(p1), Some(p2)) = (&request.player1, &request.player2)
        && p1 == p2
    {
        return Err(BracketError::InvalidPlayers(format!(
            "'{}' cannot play against themselves",
            p1
        )));
    }

    let updated = store
        .update_match(
            match_id,
            &MatchUpdate::Players {
                player1: request.player1.clone(),
                player2: request.player2.clone(),
            },
        )
        .await?;

    tracing::info!(%challenge_id, %match_id, "Players updated");

    Ok(updated)
}
