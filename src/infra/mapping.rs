use std::collections::HashSet;

use crate::api::dto::{
    DrawViewDto, GroupDto, GroupMemberDto, GroupsViewDto, ParticipantDto, RosterViewDto, WinnerDto,
};
use crate::domain::group::Group;
use crate::domain::participant::Participant;
use crate::domain::winner::WinnerHistory;
use crate::domain::ParticipantId;
use crate::engine::{DrawEngine, DrawState};
use crate::ingest::find_duplicates;

/// Маппинг участника в DTO списка.
pub fn participant_to_dto(p: &Participant, duplicates: &HashSet<ParticipantId>) -> ParticipantDto {
    ParticipantDto {
        participant_id: p.id.clone(),
        name: p.name.clone(),
        is_duplicate: duplicates.contains(&p.id),
    }
}

/// Список участников -> DTO (дубли помечаются по имени без учёта регистра).
pub fn map_roster_to_dto(roster: &[Participant]) -> RosterViewDto {
    let duplicates = find_duplicates(roster);

    RosterViewDto {
        participants: roster
            .iter()
            .map(|p| participant_to_dto(p, &duplicates))
            .collect(),
        total: roster.len() as u32,
        has_duplicates: !duplicates.is_empty(),
    }
}

/// История -> DTO, от новых к старым. Номер розыгрыша у самого свежего — наибольший.
pub fn map_history_to_dto(history: &WinnerHistory) -> Vec<WinnerDto> {
    let total = history.len();
    history
        .iter()
        .enumerate()
        .map(|(i, r)| WinnerDto {
            participant_id: r.participant.id.clone(),
            participant_name: r.participant.name.clone(),
            timestamp: r.timestamp,
            draw_number: (total - i) as u32,
        })
        .collect()
}

/// Утилита: маппинг DrawEngine + текущий список -> DrawViewDto.
pub fn map_draw_to_dto(engine: &DrawEngine, roster: &[Participant]) -> DrawViewDto {
    let showing_winner = engine.state() == DrawState::Idle
        && engine
            .history()
            .latest()
            .map(|r| r.participant.name == engine.display())
            .unwrap_or(false);

    DrawViewDto {
        state: engine.state(),
        display: engine.display().to_string(),
        allow_repeats: engine.allow_repeats(),
        pool_size: engine.pool_size(roster) as u32,
        winners: map_history_to_dto(engine.history()),
        error: engine.error().map(|e| e.to_string()),
        showing_winner,
    }
}

pub fn map_group_to_dto(group: &Group) -> GroupDto {
    GroupDto {
        group_id: group.id.clone(),
        name: group.name.clone(),
        members: group
            .members
            .iter()
            .map(|m| GroupMemberDto {
                participant_id: m.id.clone(),
                name: m.name.clone(),
            })
            .collect(),
    }
}

pub fn map_groups_to_dto(groups: &[Group], group_size: Option<usize>) -> GroupsViewDto {
    GroupsViewDto {
        groups: groups.iter().map(map_group_to_dto).collect(),
        group_size: group_size.map(|s| s as u32),
        total_participants: groups.iter().map(|g| g.len() as u32).sum(),
    }
}
