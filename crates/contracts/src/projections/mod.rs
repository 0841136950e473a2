pub mod p909_fleet_selector;
