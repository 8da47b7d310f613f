use std::collections::HashSet;

use uuid::Uuid;
use validator::Validate;

use crate::dto::challenge::CreateChallengeRequest;
use crate::error::{BracketError, BracketResult, StorageError};
use crate::models::{Actor, BracketLayout, Challenge, NewChallenge, NewMatch, Participant};
use crate::store::BracketStore;

const INVITE_CODE_LEN: usize = 8;
const INVITE_CODE_ATTEMPTS: usize = 5;

fn generate_invite_code() -> String {
    Uuid::new_v4().simple().to_string()[..INVITE_CODE_LEN].to_uppercase()
}

fn draw_layout(request: &CreateChallengeRequest) -> BracketResult<BracketLayout> {
    let entrants = u32::try_from(request.draw.len() * 2)
        .map_err(|_| BracketError::InvalidRequest("draw is too large".to_string()))?;

    BracketLayout::new(request.first_round, entrants).map_err(|e| match e {
        BracketError::InvalidBracket(msg) => BracketError::InvalidRequest(msg),
        other => other,
    })
}

/// Names are compared trimmed; a blank name is never a contestant.
fn check_unique_players(request: &CreateChallengeRequest) -> BracketResult<()> {
    let mut seen = HashSet::new();
    let names = request
        .draw
        .iter()
        .flat_map(|m| [m.player1.as_deref(), m.player2.as_deref()])
        .flatten()
        .map(str::trim);

    for name in names {
        if name.is_empty() {
            return Err(BracketError::InvalidPlayers(
                "player names must not be blank".to_string(),
            ));
        }
        if !seen.insert(name) {
            return Err(BracketError::InvalidPlayers(format!(
                "'{}' appears more than once in the draw",
                name
            )));
        }
    }

    Ok(())
}

/// Every match row of the bracket: first-round players from the draw, later rounds empty.
fn match_rows(layout: &BracketLayout, request: &CreateChallengeRequest) -> Vec<NewMatch> {
    layout
        .positions()
        .map(|(round, position)| {
            let draw = (round == layout.first_round())
                .then(|| request.draw.get(position as usize))
                .flatten();

            NewMatch {
                round,
                position,
                player1: draw.and_then(|d| d.player1.clone()),
                player2: draw.and_then(|d| d.player2.clone()),
            }
        })
        .collect()
}

/// Creates a challenge with its full match grid and registers the creator as its first
/// participant. The creator becomes the challenge admin.
pub async fn create_challenge(
    store: &dyn BracketStore,
    actor: &Actor,
    request: &CreateChallengeRequest,
) -> BracketResult<Challenge> {
    request.validate()?;
    request
        .validate_dates()
        .map_err(|msg| BracketError::InvalidRequest(msg.to_string()))?;

    let layout = draw_layout(request)?;
    check_unique_players(request)?;

    let mut attempt = 0;
    let challenge = loop {
        attempt += 1;
        let new = NewChallenge {
            name: request.name.clone(),
            description: request.description.clone(),
            tournament: request.tournament.clone(),
            invite_code: generate_invite_code(),
            start_date: request.start_date,
            end_date: request.end_date,
            created_by: actor.user_id,
        };

        match store.insert_challenge(&new).await {
            Ok(challenge) => break challenge,
            Err(StorageError::ConstraintViolation(_)) if attempt < INVITE_CODE_ATTEMPTS => {
                tracing::debug!(attempt, "Invite code collision, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    };

    store
        .insert_matches(challenge.challenge_id, &match_rows(&layout, request))
        .await?;
    store
        .add_participant(challenge.challenge_id, actor.user_id)
        .await?;

    tracing::info!(
        challenge_id = %challenge.challenge_id,
        created_by = %actor.user_id,
        first_round = layout.first_round(),
        matches = layout.total_matches(),
        "Challenge created"
    );

    Ok(challenge)
}

/// Registers the actor in the challenge behind `invite_code`.
pub async fn join_challenge(
    store: &dyn BracketStore,
    actor: &Actor,
    invite_code: &str,
) -> BracketResult<Participant> {
    let challenge = store
        .find_challenge_by_invite_code(&invite_code.trim().to_uppercase())
        .await?;
    let participant = store
        .add_participant(challenge.challenge_id, actor.user_id)
        .await?;

    tracing::info!(
        challenge_id = %challenge.challenge_id,
        user_id = %actor.user_id,
        "Joined challenge"
    );

    Ok(participant)
}
