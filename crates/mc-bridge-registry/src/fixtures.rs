//! Small source/palette pairs shared by the unit tests.

use mc_bridge_nbt::{NbtCompound, NbtTag};
use serde_json::json;

use crate::block_registry::{BlockMappings, PaletteVersion};
use crate::item_mappings::ItemMappings;
use crate::item_registry::{build_item_mappings, RawItemDefinition, RawItemTable};
use crate::quirks::{QuirkTable, PROTOCOL_1_19_0, PROTOCOL_1_19_20};
use crate::source_blocks::{RawBlockTable, SourceBlockRegistry};

/// Structural version tag used by every fixture palette.
pub const VERSION: i32 = 17_959_425;

pub fn palette_entry(name: &str, states: &[(&str, NbtTag)]) -> NbtCompound {
    let mut state_compound = NbtCompound::new();
    for (property, value) in states {
        state_compound.insert((*property).to_owned(), value.clone());
    }
    let mut entry = NbtCompound::new();
    entry.insert("name".into(), NbtTag::from(name));
    entry.insert("states".into(), NbtTag::Compound(state_compound));
    entry.insert("version".into(), NbtTag::Int(VERSION));
    entry
}

pub fn blocks_json() -> serde_json::Value {
    json!({
        "minecraft:air": {"bedrock_identifier": "minecraft:air"},
        "minecraft:water[level=0]": {
            "bedrock_identifier": "minecraft:water",
            "bedrock_states": {"liquid_depth": 0}
        },
        "minecraft:stone": {
            "bedrock_identifier": "minecraft:stone",
            "block_hardness": 1.5,
            "collision_index": 1,
            "pick_item": "minecraft:stone"
        },
        "minecraft:command_block[conditional=false,facing=north]": {
            "bedrock_identifier": "minecraft:command_block",
            "bedrock_states": {"conditional_bit": false, "facing_direction": 2},
            "has_block_entity": true
        },
        "minecraft:moving_piston[facing=north,type=normal]": {
            "bedrock_identifier": "minecraft:moving_block",
            "piston_behavior": "block"
        },
        "minecraft:oak_stairs[facing=north,half=bottom,shape=straight,waterlogged=true]": {
            "bedrock_identifier": "minecraft:oak_stairs",
            "bedrock_states": {"upside_down_bit": false, "weirdo_direction": 3}
        },
        "minecraft:oak_stairs[facing=north,half=bottom,shape=straight,waterlogged=false]": {
            "bedrock_identifier": "minecraft:oak_stairs",
            "bedrock_states": {"upside_down_bit": false, "weirdo_direction": 3}
        },
        "minecraft:kelp[age=0]": {
            "bedrock_identifier": "minecraft:kelp",
            "bedrock_states": {"kelp_age": 0}
        },
        "minecraft:seagrass": {
            "bedrock_identifier": "minecraft:seagrass",
            "bedrock_states": {"sea_grass_type": "default"}
        },
        "minecraft:jigsaw[orientation=north_up]": {
            "bedrock_identifier": "minecraft:jigsaw",
            "bedrock_states": {"facing_direction": 2, "rotation": 0}
        },
        "minecraft:dandelion": {
            "bedrock_identifier": "minecraft:yellow_flower",
            "pottable": true
        },
        "minecraft:muddy_mangrove_roots[axis=y]": {
            "bedrock_identifier": "minecraft:muddy_mangrove_roots",
            "bedrock_states": {"pillar_axis": "y"}
        },
        "minecraft:bubble_column[drag=true]": {
            "bedrock_identifier": "minecraft:bubble_column",
            "bedrock_states": {"drag_down": true}
        }
    })
}

pub fn raw_blocks() -> RawBlockTable {
    serde_json::from_value(blocks_json()).expect("fixture blocks parse")
}

pub fn source_blocks() -> SourceBlockRegistry {
    SourceBlockRegistry::from_raw(&raw_blocks()).expect("fixture blocks build")
}

fn frame(name: &str) -> NbtCompound {
    palette_entry(
        name,
        &[
            ("facing_direction", NbtTag::Int(0)),
            ("item_frame_map_bit", NbtTag::Byte(0)),
            ("item_frame_photo_bit", NbtTag::Byte(0)),
        ],
    )
}

/// Palette matching [`blocks_json`]. Protocol 527 lacks the mangrove roots axis.
pub fn palette(protocol: u32) -> Vec<NbtCompound> {
    let roots = if protocol == PROTOCOL_1_19_0 {
        palette_entry("minecraft:muddy_mangrove_roots", &[])
    } else {
        palette_entry(
            "minecraft:muddy_mangrove_roots",
            &[("pillar_axis", NbtTag::from("y"))],
        )
    };
    vec![
        palette_entry("minecraft:air", &[]),
        palette_entry("minecraft:water", &[("liquid_depth", NbtTag::Int(0))]),
        palette_entry("minecraft:stone", &[]),
        palette_entry(
            "minecraft:command_block",
            &[
                ("conditional_bit", NbtTag::Byte(0)),
                ("facing_direction", NbtTag::Int(2)),
            ],
        ),
        palette_entry("minecraft:moving_block", &[]),
        palette_entry(
            "minecraft:oak_stairs",
            &[
                ("upside_down_bit", NbtTag::Byte(0)),
                ("weirdo_direction", NbtTag::Int(3)),
            ],
        ),
        palette_entry("minecraft:kelp", &[("kelp_age", NbtTag::Int(0))]),
        palette_entry("minecraft:seagrass", &[("sea_grass_type", NbtTag::from("default"))]),
        palette_entry(
            "minecraft:jigsaw",
            &[
                ("facing_direction", NbtTag::Int(2)),
                ("rotation", NbtTag::Int(0)),
            ],
        ),
        palette_entry("minecraft:yellow_flower", &[]),
        roots,
        frame("minecraft:frame"),
        frame("minecraft:glow_frame"),
        palette_entry("minecraft:dirt", &[("dirt_type", NbtTag::from("normal"))]),
        palette_entry("minecraft:bubble_column", &[("drag_down", NbtTag::Byte(1))]),
    ]
}

pub fn palette_version(protocol: u32) -> PaletteVersion {
    let label = if protocol == PROTOCOL_1_19_0 {
        "1_19_0"
    } else if protocol == PROTOCOL_1_19_20 {
        "1_19_20"
    } else {
        "fixture"
    };
    PaletteVersion {
        protocol,
        label: label.into(),
        quirks: QuirkTable::builtin(protocol),
        palette: palette(protocol),
    }
}

/// Source items, ids 0..=27. Block ids refer to [`blocks_json`].
pub fn items_json() -> serde_json::Value {
    json!({
        "minecraft:air": {"bedrock_identifier": "minecraft:air"},
        "minecraft:stone": {"bedrock_identifier": "minecraft:stone", "block_runtime_id": 2},
        "minecraft:bamboo": {"bedrock_identifier": "minecraft:bamboo"},
        "minecraft:white_banner": {"bedrock_identifier": "minecraft:banner", "bedrock_data": 15, "stack_size": 16},
        "minecraft:chest": {"bedrock_identifier": "minecraft:chest"},
        "minecraft:compass": {"bedrock_identifier": "minecraft:compass"},
        "minecraft:egg": {"bedrock_identifier": "minecraft:egg", "stack_size": 16},
        "minecraft:glass_bottle": {"bedrock_identifier": "minecraft:glass_bottle"},
        "minecraft:milk_bucket": {"bedrock_identifier": "minecraft:bucket", "bedrock_data": 1, "stack_size": 1},
        "minecraft:saddle": {"bedrock_identifier": "minecraft:saddle", "stack_size": 1},
        "minecraft:shears": {"bedrock_identifier": "minecraft:shears", "stack_size": 1},
        "minecraft:shield": {"bedrock_identifier": "minecraft:shield", "stack_size": 1},
        "minecraft:water_bucket": {"bedrock_identifier": "minecraft:bucket", "bedrock_data": 8, "stack_size": 1},
        "minecraft:wheat": {"bedrock_identifier": "minecraft:wheat"},
        "minecraft:writable_book": {"bedrock_identifier": "minecraft:writable_book", "stack_size": 1},
        "minecraft:potion": {"bedrock_identifier": "minecraft:potion", "stack_size": 1},
        "minecraft:oak_boat": {"bedrock_identifier": "minecraft:oak_boat", "stack_size": 1},
        "minecraft:bamboo_raft": {"bedrock_identifier": "minecraft:bamboo_raft", "stack_size": 1},
        "minecraft:cow_spawn_egg": {"bedrock_identifier": "minecraft:spawn_egg", "bedrock_data": 11},
        "minecraft:white_carpet": {"bedrock_identifier": "minecraft:carpet"},
        "minecraft:moss_carpet": {"bedrock_identifier": "minecraft:moss_carpet"},
        "minecraft:debug_stick": {"substitute_identifier": "minecraft:stick", "stack_size": 1},
        "minecraft:knowledge_book": {"stack_size": 1},
        "minecraft:bucket": {"bedrock_identifier": "minecraft:bucket", "stack_size": 16},
        "minecraft:stick": {"bedrock_identifier": "minecraft:stick"},
        "minecraft:kelp": {"bedrock_identifier": "minecraft:kelp", "block_runtime_id": 7},
        "minecraft:arrow": {"bedrock_identifier": "minecraft:arrow"},
        "minecraft:dandelion": {
            "bedrock_identifier": "minecraft:yellow_flower",
            "block_runtime_id": 10,
            "pick_item": "minecraft:dandelion"
        }
    })
}

pub fn item_definitions() -> Vec<RawItemDefinition> {
    serde_json::from_value(json!([
        {"name": "minecraft:stone", "id": 1},
        {"name": "minecraft:bamboo", "id": -163},
        {"name": "minecraft:banner", "id": 567},
        {"name": "minecraft:chest", "id": 54},
        {"name": "minecraft:compass", "id": 391},
        {"name": "minecraft:egg", "id": 390},
        {"name": "minecraft:glass_bottle", "id": 427},
        {"name": "minecraft:bucket", "id": 360},
        {"name": "minecraft:saddle", "id": 370},
        {"name": "minecraft:shears", "id": 421},
        {"name": "minecraft:shield", "id": 355},
        {"name": "minecraft:wheat", "id": 334},
        {"name": "minecraft:writable_book", "id": 510},
        {"name": "minecraft:potion", "id": 426},
        {"name": "minecraft:oak_boat", "id": 375},
        {"name": "minecraft:bamboo_raft", "id": 640},
        {"name": "minecraft:spawn_egg", "id": 447},
        {"name": "minecraft:carpet", "id": -335},
        {"name": "minecraft:moss_carpet", "id": -336},
        {"name": "minecraft:stick", "id": 320},
        {"name": "minecraft:kelp", "id": 383},
        {"name": "minecraft:arrow", "id": 301},
        {"name": "minecraft:yellow_flower", "id": 37},
        {"name": "minecraft:lodestone_compass", "id": 602, "component_based": false}
    ]))
    .expect("fixture item definitions parse")
}

pub fn creative_items() -> Vec<String> {
    ["minecraft:stone", "minecraft:oak_boat", "minecraft:stick"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn block_mappings() -> BlockMappings {
    BlockMappings::build(&source_blocks(), palette_version(PROTOCOL_1_19_20))
        .expect("fixture block mappings build")
}

pub fn item_mappings() -> ItemMappings {
    let raw: RawItemTable = serde_json::from_value(items_json()).expect("fixture items parse");
    build_item_mappings(&raw, &item_definitions(), &creative_items(), &block_mappings())
        .expect("fixture items build")
}
