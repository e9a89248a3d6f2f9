use crate::common::RpcMethod;

/// View functions shared by the staking contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMethod {
    GetUserStaking,
    CalculateRewardsForUser,
    GetApr,
    GetLockDays,
    GetTokensPerDay,
}

impl RpcMethod for ViewMethod {
    fn as_str(&self) -> &'static str {
        match self {
            ViewMethod::GetUserStaking => "getUserStaking",
            ViewMethod::CalculateRewardsForUser => "calculateRewardsForUser",
            ViewMethod::GetApr => "getApr",
            ViewMethod::GetLockDays => "getLockDays",
            ViewMethod::GetTokensPerDay => "getTokensPerDay",
        }
    }
}

impl std::fmt::Display for ViewMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const PAGE_SIZE: usize = 10_000;

pub enum ApiPath<'a> {
    VmQuery,
    AccountToken { address: &'a str, token: &'a str },
    AccountNfts { address: &'a str, collection: &'a str },
    CollectionNfts { collection: &'a str, identifiers: &'a [String] },
    MexToken { identifier: &'a str },
}

impl ApiPath<'_> {
    pub fn path(&self) -> String {
        match self {
            ApiPath::VmQuery => "query".to_string(),
            ApiPath::AccountToken { address, token } => {
                format!("accounts/{}/tokens/{}", address, token)
            }
            ApiPath::AccountNfts {
                address,
                collection,
            } => format!(
                "accounts/{}/nfts?size={}&collections={}",
                address, PAGE_SIZE, collection
            ),
            ApiPath::CollectionNfts {
                collection,
                identifiers,
            } => format!(
                "collections/{}/nfts?size={}&identifiers={}",
                collection,
                PAGE_SIZE,
                identifiers.join(",")
            ),
            ApiPath::MexToken { identifier } => format!("mex/tokens/{}", identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_method_names() {
        assert_eq!(ViewMethod::GetUserStaking.to_string(), "getUserStaking");
        assert_eq!(
            ViewMethod::CalculateRewardsForUser.as_str(),
            "calculateRewardsForUser"
        );
    }

    #[test]
    fn test_api_paths() {
        assert_eq!(ApiPath::VmQuery.path(), "query");
        assert_eq!(
            ApiPath::AccountToken {
                address: "erd1x",
                token: "XCUMB-da0e35"
            }
            .path(),
            "accounts/erd1x/tokens/XCUMB-da0e35"
        );
        assert_eq!(
            ApiPath::AccountNfts {
                address: "erd1x",
                collection: "GIANT-1ed993"
            }
            .path(),
            "accounts/erd1x/nfts?size=10000&collections=GIANT-1ed993"
        );

        let ids = ["GIANT-1ed993-01".to_string(), "GIANT-1ed993-0a".to_string()];
        assert_eq!(
            ApiPath::CollectionNfts {
                collection: "GIANT-1ed993",
                identifiers: &ids
            }
            .path(),
            "collections/GIANT-1ed993/nfts?size=10000&identifiers=GIANT-1ed993-01,GIANT-1ed993-0a"
        );
        assert_eq!(
            ApiPath::MexToken {
                identifier: "DEFRA-3961e1"
            }
            .path(),
            "mex/tokens/DEFRA-3961e1"
        );
    }
}
