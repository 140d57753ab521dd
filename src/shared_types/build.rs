use anyhow::Result;
use crux_core::typegen::TypeGen;
use std::path::PathBuf;
use transit_board_config_core::{
    events::{FormEvent, NavigationEvent, SyncEvent, UiEvent},
    types::{
        FieldKind, LoadPhase, LoadState, PageId, RotationMode, SaveState, Scope, SettingValue,
        TransitionDirection,
    },
    App, Network,
};

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<NavigationEvent>()?;
    gen.register_type::<FormEvent>()?;
    gen.register_type::<SyncEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Explicitly register other enums to ensure all variants are traced
    gen.register_type::<PageId>()?;
    gen.register_type::<TransitionDirection>()?;
    gen.register_type::<Scope>()?;
    gen.register_type::<Network>()?;
    gen.register_type::<RotationMode>()?;
    gen.register_type::<FieldKind>()?;
    gen.register_type::<SettingValue>()?;
    gen.register_type::<LoadPhase>()?;
    gen.register_type::<LoadState>()?;
    gen.register_type::<SaveState>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
