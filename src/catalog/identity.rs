//! Identity API roots: vehicles, devices, manufacturers and names

use crate::core::{ArgumentStyle, ParameterDefinition, ParameterKind, SchemaField, SchemaRoot};

fn token_id() -> ParameterDefinition {
    ParameterDefinition::new("tokenId", ParameterKind::Number)
        .required()
        .with_placeholder("e.g. 21957")
        .with_description("NFT token id")
}

fn definition() -> SchemaField {
    SchemaField::object(
        "definition",
        vec![
            SchemaField::leaf("id"),
            SchemaField::leaf("make"),
            SchemaField::leaf("model"),
            SchemaField::leaf("year"),
        ],
    )
}

fn earnings() -> SchemaField {
    SchemaField::object(
        "earnings",
        vec![
            SchemaField::leaf("totalTokens"),
            SchemaField::edges(
                "history",
                vec![
                    SchemaField::leaf("week"),
                    SchemaField::leaf("beneficiary"),
                    SchemaField::leaf("connectionStreak"),
                    SchemaField::leaf("streakTokens"),
                    SchemaField::leaf("aftermarketDeviceTokens"),
                    SchemaField::leaf("syntheticDeviceTokens"),
                    SchemaField::leaf("sentAt"),
                ],
            )
            .paginated(),
        ],
    )
}

fn vehicle_fields() -> Vec<SchemaField> {
    vec![
        SchemaField::leaf("id"),
        SchemaField::leaf("tokenId"),
        SchemaField::leaf("owner"),
        SchemaField::leaf("mintedAt"),
        SchemaField::leaf("name"),
        SchemaField::leaf("image"),
        definition(),
        SchemaField::object(
            "manufacturer",
            vec![
                SchemaField::leaf("tokenId"),
                SchemaField::leaf("name"),
                SchemaField::leaf("owner"),
            ],
        ),
        SchemaField::object(
            "aftermarketDevice",
            vec![
                SchemaField::leaf("tokenId"),
                SchemaField::leaf("address"),
                SchemaField::leaf("serial"),
                SchemaField::leaf("imei"),
                SchemaField::leaf("pairedAt"),
            ],
        ),
        SchemaField::object(
            "syntheticDevice",
            vec![
                SchemaField::leaf("tokenId"),
                SchemaField::leaf("address"),
                SchemaField::leaf("mintedAt"),
            ],
        ),
        SchemaField::nodes(
            "sacds",
            vec![
                SchemaField::leaf("grantee"),
                SchemaField::leaf("permissions"),
                SchemaField::leaf("source"),
                SchemaField::leaf("createdAt"),
                SchemaField::leaf("expiresAt"),
            ],
        )
        .paginated(),
        earnings(),
        SchemaField::object(
            "dcn",
            vec![SchemaField::leaf("name"), SchemaField::leaf("node")],
        ),
    ]
}

/// Single vehicle by token id
pub fn vehicle() -> SchemaRoot {
    SchemaRoot::new("vehicle", "vehicle")
        .with_description("Look up one vehicle by its token id")
        .with_parameter(token_id())
        .with_fields(vehicle_fields())
}

/// Paginated vehicle collection with optional owner filters
pub fn vehicles() -> SchemaRoot {
    SchemaRoot::new("vehicles", "vehicles")
        .with_description("List vehicles, optionally filtered by owner or privileged address")
        .with_arguments(ArgumentStyle::Filter {
            argument: "filterBy".to_string(),
            limit: Some("first".to_string()),
        })
        .with_parameter(
            ParameterDefinition::new("first", ParameterKind::Number)
                .with_default("10")
                .with_description("Page size"),
        )
        .with_parameter(
            ParameterDefinition::new("owner", ParameterKind::Address)
                .with_placeholder("0x… owner address"),
        )
        .with_parameter(
            ParameterDefinition::new("privileged", ParameterKind::Address)
                .with_placeholder("0x… grantee address"),
        )
        .with_fields(vec![
            SchemaField::leaf("totalCount"),
            SchemaField::object(
                "pageInfo",
                vec![
                    SchemaField::leaf("hasNextPage"),
                    SchemaField::leaf("hasPreviousPage"),
                    SchemaField::leaf("startCursor"),
                    SchemaField::leaf("endCursor"),
                ],
            ),
            SchemaField::object(
                "nodes",
                vec![
                    SchemaField::leaf("tokenId"),
                    SchemaField::leaf("owner"),
                    SchemaField::leaf("mintedAt"),
                    SchemaField::leaf("name"),
                    definition(),
                ],
            ),
        ])
}

/// Aftermarket device looked up through a `by` object
pub fn aftermarket_device() -> SchemaRoot {
    SchemaRoot::new("aftermarketDevice", "aftermarketDevice")
        .with_description("Look up one aftermarket device")
        .with_arguments(ArgumentStyle::Wrapped {
            argument: "by".to_string(),
        })
        .with_parameter(token_id())
        .with_fields(vec![
            SchemaField::leaf("id"),
            SchemaField::leaf("tokenId"),
            SchemaField::leaf("address"),
            SchemaField::leaf("owner"),
            SchemaField::leaf("serial"),
            SchemaField::leaf("imei"),
            SchemaField::leaf("devEUI"),
            SchemaField::leaf("mintedAt"),
            SchemaField::leaf("claimedAt"),
            SchemaField::object(
                "manufacturer",
                vec![SchemaField::leaf("tokenId"), SchemaField::leaf("name")],
            ),
            SchemaField::object(
                "vehicle",
                vec![SchemaField::leaf("tokenId"), definition()],
            ),
            earnings(),
        ])
}

/// Manufacturer looked up by name
pub fn manufacturer() -> SchemaRoot {
    SchemaRoot::new("manufacturer", "manufacturer")
        .with_description("Look up one manufacturer by name")
        .with_arguments(ArgumentStyle::Wrapped {
            argument: "by".to_string(),
        })
        .with_parameter(
            ParameterDefinition::new("name", ParameterKind::String)
                .required()
                .with_placeholder("e.g. AutoPi"),
        )
        .with_fields(vec![
            SchemaField::leaf("id"),
            SchemaField::leaf("tokenId"),
            SchemaField::leaf("name"),
            SchemaField::leaf("owner"),
            SchemaField::leaf("mintedAt"),
            SchemaField::edges(
                "aftermarketDevices",
                vec![
                    SchemaField::leaf("tokenId"),
                    SchemaField::leaf("serial"),
                    SchemaField::leaf("owner"),
                ],
            )
            .paginated(),
        ])
}

/// Name-service record looked up by name
pub fn dcn() -> SchemaRoot {
    SchemaRoot::new("dcn", "dcn")
        .with_description("Look up a name record")
        .with_arguments(ArgumentStyle::Wrapped {
            argument: "by".to_string(),
        })
        .with_parameter(
            ParameterDefinition::new("name", ParameterKind::String)
                .required()
                .with_placeholder("e.g. mycar.dimo"),
        )
        .with_fields(vec![
            SchemaField::leaf("node"),
            SchemaField::leaf("tokenId"),
            SchemaField::leaf("owner"),
            SchemaField::leaf("expiresAt"),
            SchemaField::leaf("mintedAt"),
            SchemaField::leaf("name"),
            SchemaField::object("vehicle", vec![SchemaField::leaf("tokenId")]),
        ])
}

/// All identity roots in selector order
pub fn roots() -> Vec<SchemaRoot> {
    vec![
        vehicle(),
        vehicles(),
        aftermarket_device(),
        manufacturer(),
        dcn(),
    ]
}
