use wasm_bindgen::prelude::*;
use nanmu_engine::*;

pub mod game;
use game::NinmuNanmu;

nanmu_web::export_game!(NinmuNanmu, "ninmu-nanmu");
