//! Message handlers
//!
//! Every handler is synchronous; point and region mutations complete before
//! control returns to the event loop.

use super::messages::{Msg, PointerMsg, RegionMsg};
use super::state::ClipSession;

pub fn handle_msg(session: &mut ClipSession, msg: Msg) {
    match msg {
        Msg::Pointer(msg) => handle_pointer_msg(session, msg),
        Msg::Region(msg) => handle_region_msg(session, msg),
    }
}

pub fn handle_pointer_msg(session: &mut ClipSession, msg: PointerMsg) {
    match msg {
        PointerMsg::Down { x, y } => session.on_pointer_down(x, y),
        PointerMsg::Move { x, y } => session.on_pointer_move(x, y),
        PointerMsg::Up => session.on_pointer_up(),
        PointerMsg::Leave => session.on_pointer_leave(),
    }
}

pub fn handle_region_msg(session: &mut ClipSession, msg: RegionMsg) {
    match msg {
        RegionMsg::Delete { index } => {
            if session.delete_region(index).is_none() {
                log::warn!("No region at position {index} to delete");
            }
        }
        RegionMsg::ClearAll => session.clear_all_regions(),
        RegionMsg::ClearPoints => session.clear_points(),
    }
}
