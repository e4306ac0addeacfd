//! Account roles

wire_enum! {
    /// Account role as carried in the access token and the profile
    Role, "role" {
        /// Property owner
        Proprietaire => "proprietaire",
        /// Tenant
        Locataire => "locataire",
    }
}
